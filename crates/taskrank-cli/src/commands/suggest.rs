use clap::Args;
use taskrank_core::{suggest, EngineConfig, SuggestRequest};

use crate::common::{print_json, CliResult, InputArgs};

#[derive(Args)]
pub struct SuggestArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Number of suggestions (default: request body, then config, then 3)
    #[arg(long, short = 'n', allow_negative_numbers = true)]
    count: Option<i64>,
}

pub fn run(args: SuggestArgs, config: &EngineConfig) -> CliResult {
    let mut request = SuggestRequest::from_value(args.input.read_body()?)?;
    if let Some(strategy) = args.input.strategy.clone() {
        request.strategy = Some(strategy);
    }
    if let Some(count) = args.count {
        request.count = Some(count);
    }
    let today = args.input.today()?;

    let response = suggest(&request, config, today)?;
    tracing::info!(
        requested = response.requested_count,
        returned = response.returned_count,
        strategy = %response.strategy,
        "suggestions ready"
    );
    print_json(&response, args.input.pretty)
}
