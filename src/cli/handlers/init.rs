use crate::config::{CONFIG_FILE, LeadSettings, RtsConfig, RtsSettings};
use crate::error::RtsError;
use anyhow::Result;
use colored::Colorize;

pub fn handle_init(endpoint: Option<String>) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(CONFIG_FILE);

    if config_path.exists() {
        return Err(RtsError::AlreadyInitialized(config_path.display().to_string()).into());
    }

    let mut lead = LeadSettings::default();
    if let Some(endpoint) = endpoint {
        url::Url::parse(&endpoint)
            .map_err(|e| anyhow::anyhow!("Invalid endpoint URL '{}': {}", endpoint, e))?;
        lead.endpoint = endpoint;
    }

    let config = RtsConfig {
        rts: RtsSettings::default(),
        lead,
    };

    let store_path = config.local_store_path(&cwd);
    std::fs::create_dir_all(&store_path)?;
    config.save(&config_path)?;

    println!(
        "{} rts project in {}",
        "Initialized".green(),
        cwd.display()
    );
    println!("  Config:   {}", config_path.display());
    println!("  Data:     {}", store_path.display());
    println!("  Endpoint: {}", config.lead.endpoint);

    Ok(())
}
