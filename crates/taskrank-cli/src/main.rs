use std::path::PathBuf;

use clap::{Parser, Subcommand};
use taskrank_core::EngineConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "taskrank", version, about = "Explainable task prioritization")]
struct Cli {
    /// Config file (default: ~/.config/taskrank/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "taskrank_core=debug" (default: $RUST_LOG or "warn")
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a batch of tasks and print all of them, highest priority first
    Analyze(commands::analyze::AnalyzeArgs),
    /// Print the top N tasks to work on, with reasons
    Suggest(commands::suggest::SuggestArgs),
    /// Show the effective weight profile of every strategy
    Strategies(commands::strategies::StrategiesArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(level: Option<&str>) {
    let filter = level
        .and_then(|l| EnvFilter::try_new(l).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let config_path = cli.config.unwrap_or_else(EngineConfig::path);
    let result = match cli.command {
        Commands::Config { action } => commands::config::run(action, &config_path),
        Commands::Analyze(args) => {
            common::load_config(&config_path).and_then(|c| commands::analyze::run(args, &c))
        }
        Commands::Suggest(args) => {
            common::load_config(&config_path).and_then(|c| commands::suggest::run(args, &c))
        }
        Commands::Strategies(args) => {
            common::load_config(&config_path).and_then(|c| commands::strategies::run(args, &c))
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
