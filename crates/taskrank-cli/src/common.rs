//! Shared helpers for CLI commands.

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::Args;
use serde::Serialize;
use taskrank_core::task::DATE_FORMAT;
use taskrank_core::EngineConfig;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Input options shared by `analyze` and `suggest`.
#[derive(Args)]
pub struct InputArgs {
    /// JSON file holding `{"tasks": [...]}` or a bare task array ("-" or omitted: stdin)
    pub file: Option<PathBuf>,
    /// Strategy: smart_balance, fastest_wins, deadline_driven, high_impact
    #[arg(long, short)]
    pub strategy: Option<String>,
    /// Evaluation date, YYYY-MM-DD (default: local date)
    #[arg(long)]
    pub today: Option<String>,
    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl InputArgs {
    pub fn read_body(&self) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
        let content = match self.file.as_deref() {
            Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?,
            _ => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };
        Ok(serde_json::from_str(&content)?)
    }

    pub fn today(&self) -> Result<NaiveDate, Box<dyn std::error::Error>> {
        match self.today.as_deref() {
            Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
                .map_err(|e| format!("invalid --today '{s}': {e}").into()),
            None => Ok(Local::now().date_naive()),
        }
    }
}

pub fn load_config(path: &Path) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    Ok(EngineConfig::load_from(path)?)
}

pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> CliResult {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
