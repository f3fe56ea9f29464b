use std::path::Path;

use clap::Subcommand;
use taskrank_core::EngineConfig;

use crate::common::{load_config, CliResult};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "default_strategy", "curves.blocking_rate")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key (e.g. "strategies.fastest_wins", value as JSON object)
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
    /// Print the config file location
    Path,
}

pub fn run(action: ConfigAction, path: &Path) -> CliResult {
    match action {
        ConfigAction::Get { key } => {
            let config = load_config(path)?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = load_config(path)?;
            config.set(&key, &value)?;
            config.save_to(path)?;
            tracing::info!(%key, path = %path.display(), "config updated");
            println!("ok");
        }
        ConfigAction::List => {
            let config = load_config(path)?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            EngineConfig::default().save_to(path)?;
            println!("config reset to defaults");
        }
        ConfigAction::Path => println!("{}", path.display()),
    }
    Ok(())
}
