use clap::Args;
use serde::Serialize;
use taskrank_core::{EngineConfig, StrategyName, StrategyWeights};

use crate::common::{print_json, CliResult};

#[derive(Args)]
pub struct StrategiesArgs {
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct StrategyRow {
    name: StrategyName,
    weights: StrategyWeights,
    overridden: bool,
    default: bool,
}

pub fn run(args: StrategiesArgs, config: &EngineConfig) -> CliResult {
    let rows: Vec<StrategyRow> = StrategyName::ALL
        .into_iter()
        .map(|name| StrategyRow {
            name,
            weights: config.profile(name).weights,
            overridden: config.strategies.contains_key(name.as_str()),
            default: config.default_strategy == name,
        })
        .collect();

    if args.json {
        return print_json(&rows, true);
    }

    println!(
        "{:<16} {:>8} {:>10} {:>8} {:>12}",
        "strategy", "urgency", "importance", "effort", "dependencies"
    );
    for row in rows {
        let mut marks = Vec::new();
        if row.default {
            marks.push("default");
        }
        if row.overridden {
            marks.push("override");
        }
        let suffix = if marks.is_empty() {
            String::new()
        } else {
            format!("  ({})", marks.join(", "))
        };
        println!(
            "{:<16} {:>8.2} {:>10.2} {:>8.2} {:>12.2}{suffix}",
            row.name.as_str(),
            row.weights.urgency,
            row.weights.importance,
            row.weights.effort,
            row.weights.dependencies,
        );
    }
    Ok(())
}
