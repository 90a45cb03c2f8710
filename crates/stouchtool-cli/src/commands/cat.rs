//! Implementation of `s-cat`.
//!
//! Responsibility: translate CLI arguments into a `CatRequest`, call the core
//! cat service, and print the summary. No business logic lives here.

use std::path::PathBuf;

use tracing::{info, instrument};

use stouchtool_adapters::{PairwiseCombiner, TouchstoneFiles};
use stouchtool_core::application::{CatReport, CatRequest, CatService};

use crate::{
    cli::CatCli,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Execute `s-cat`.
#[instrument(skip_all, fields(files = args.inputs.len()))]
pub fn execute(args: CatCli, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let files = TouchstoneFiles::new(config.touchstone.format);
    let service = CatService::new(
        Box::new(files),
        Box::new(files),
        Box::new(PairwiseCombiner::new()),
    );

    let request = CatRequest::new(args.inputs)
        .with_output(args.output)
        .with_ports(args.numports);

    let report = service
        .cat(request)
        .with_cli_context(|| "concatenating 2-port files")?;
    info!(output = %report.output.display(), "Network stored");

    output
        .summary(&summary_line(&report), &report)
        .with_cli_context(|| "writing summary")
}

/// `The cat from files ['a', 'b'] has been stored in out`.
fn summary_line(report: &CatReport) -> String {
    format!(
        "The cat from files {} has been stored in {}",
        quoted_list(&report.inputs),
        report.output.display()
    )
}

fn quoted_list(paths: &[PathBuf]) -> String {
    let items: Vec<String> = paths
        .iter()
        .map(|p| format!("'{}'", p.display()))
        .collect();
    format!("[{}]", items.join(", "))
}
