use crate::error::{Result, RtsError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = ".rts.toml";

/// Remote lead intake endpoint used when nothing overrides it.
pub const DEFAULT_ENDPOINT: &str = "https://api.rts-terzosettore.it/v1/leads";

/// Identifier sent as `source_site` on every lead.
pub const DEFAULT_SOURCE_SITE: &str = "rts";

pub const DEFAULT_ORG_TYPE: &str = "terzo_settore";

pub const DEFAULT_PAGE_URL: &str = "https://www.rts-terzosettore.it/area-riservata/";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RtsConfig {
    #[serde(default)]
    pub rts: RtsSettings,

    #[serde(default)]
    pub lead: LeadSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RtsSettings {
    /// Data directory, relative to the project root.
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_path() -> String {
    ".rts".to_string()
}

impl Default for RtsSettings {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_source_site")]
    pub source_site: String,

    #[serde(default = "default_org_type")]
    pub default_org_type: String,

    /// Page URL reported as `source_url` when the caller gives none.
    #[serde(default = "default_page_url")]
    pub page_url: String,

    /// Also match storage keys by hint substrings, not only by known key or namespace.
    #[serde(default = "default_legacy_hints")]
    pub legacy_hints: bool,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_source_site() -> String {
    DEFAULT_SOURCE_SITE.to_string()
}

fn default_org_type() -> String {
    DEFAULT_ORG_TYPE.to_string()
}

fn default_page_url() -> String {
    DEFAULT_PAGE_URL.to_string()
}

fn default_legacy_hints() -> bool {
    true
}

impl Default for LeadSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            source_site: default_source_site(),
            default_org_type: default_org_type(),
            page_url: default_page_url(),
            legacy_hints: default_legacy_hints(),
        }
    }
}

impl RtsConfig {
    pub fn load(start_path: &Path) -> Result<(Self, PathBuf)> {
        let config_path = Self::find_config_file(start_path)?;
        let content = std::fs::read_to_string(&config_path)?;
        let config: RtsConfig = toml::from_str(&content)?;
        let project_root = config_path
            .parent()
            .ok_or_else(|| RtsError::Config("Config file has no parent directory".to_string()))?
            .to_path_buf();
        Ok((config, project_root))
    }

    pub fn find_config_file(start_path: &Path) -> Result<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE);
            if config_path.exists() {
                return Ok(config_path);
            }
            if !current.pop() {
                return Err(RtsError::NotInitialized);
            }
        }
    }

    pub fn data_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.rts.path)
    }

    /// Directory backing the long-lived storage area.
    pub fn local_store_path(&self, project_root: &Path) -> PathBuf {
        self.data_path(project_root).join("local")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: RtsConfig = toml::from_str("[lead]\nendpoint = \"http://localhost:9/leads\"\n").unwrap();
        assert_eq!(config.lead.endpoint, "http://localhost:9/leads");
        assert_eq!(config.lead.source_site, DEFAULT_SOURCE_SITE);
        assert_eq!(config.rts.path, ".rts");
        assert!(config.lead.legacy_hints);
    }

    #[test]
    fn test_find_config_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        RtsConfig::default()
            .save(&temp_dir.path().join(CONFIG_FILE))
            .unwrap();
        let nested = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (_, root) = RtsConfig::load(&nested).unwrap();
        assert_eq!(root, temp_dir.path());
    }

    #[test]
    fn test_missing_config_is_not_initialized() {
        let temp_dir = TempDir::new().unwrap();
        let err = RtsConfig::find_config_file(temp_dir.path()).unwrap_err();
        assert!(matches!(err, RtsError::NotInitialized));
    }
}
