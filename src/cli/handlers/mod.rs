mod contact;
mod init;
mod lead;
mod progress;
mod reset;
mod utils;
mod wizard;

pub use contact::handle_contact;
pub use init::handle_init;
pub use lead::{handle_lead_build, handle_lead_submit};
pub use progress::{handle_outcome, handle_status, handle_summary};
pub use reset::handle_reset;
pub use wizard::{handle_answer, handle_back, handle_note, handle_show, handle_wizard};

use crate::config::RtsConfig;
use crate::storage::{AnswerStore, FileStore};
use crate::wizard::Wizard;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: RtsConfig,
    pub root: PathBuf,
    pub wizard: Wizard<FileStore>,
}

impl CommandContext {
    pub fn new(config: RtsConfig, root: PathBuf) -> Self {
        let store = FileStore::new(config.local_store_path(&root));
        let wizard = Wizard::new(AnswerStore::new(store));
        Self {
            config,
            root,
            wizard,
        }
    }

    /// Load the project config, either from `config_path` or by searching upward.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let (config, root) = match config_path {
            Some(path) => {
                let path = Path::new(path);
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                let config: RtsConfig = toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config {}", path.display()))?;
                let root = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    Some(parent) => parent.to_path_buf(),
                    None => std::env::current_dir()?,
                };
                (config, root)
            }
            None => {
                let cwd = std::env::current_dir()?;
                RtsConfig::load(&cwd).context("Failed to load config")?
            }
        };
        tracing::debug!(root = %root.display(), "Loaded project config");
        Ok(Self::new(config, root))
    }
}
