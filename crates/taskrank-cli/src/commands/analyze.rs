use clap::Args;
use taskrank_core::{analyze, AnalyzeRequest, EngineConfig};

use crate::common::{print_json, CliResult, InputArgs};

#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    input: InputArgs,
}

pub fn run(args: AnalyzeArgs, config: &EngineConfig) -> CliResult {
    let mut request = AnalyzeRequest::from_value(args.input.read_body()?)?;
    if let Some(strategy) = args.input.strategy.clone() {
        request.strategy = Some(strategy);
    }
    let today = args.input.today()?;

    let response = analyze(&request, config, today)?;
    tracing::info!(
        total = response.total_tasks,
        strategy = %response.strategy,
        "analysis complete"
    );
    print_json(&response, args.input.pretty)
}
