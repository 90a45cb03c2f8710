//! Implementation of `s-plot`.

use tracing::{info, instrument};

use stouchtool_adapters::{PdfChartRenderer, TouchstoneFiles};
use stouchtool_core::application::{PlotReport, PlotRequest, PlotService};

use crate::{
    cli::PlotCli,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Execute `s-plot`.
#[instrument(skip_all, fields(input = %args.input.display()))]
pub fn execute(args: PlotCli, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let renderer =
        PdfChartRenderer::new(config.plot.page()).with_line_width(config.plot.line_width);
    let service = PlotService::new(
        Box::new(TouchstoneFiles::new(config.touchstone.format)),
        Box::new(renderer),
    );

    let request = PlotRequest::new(args.input)
        .with_output(args.output)
        .with_title(args.title);

    let report = service
        .plot(request)
        .with_cli_context(|| "plotting network")?;
    info!(output = %report.output.display(), "Plot written");

    output
        .summary(&summary_line(&report), &report)
        .with_cli_context(|| "writing summary")
}

fn summary_line(report: &PlotReport) -> String {
    format!(
        "The plot from file {} has {} ports and has been plotted in {}",
        report.input.display(),
        report.ports,
        report.output.display()
    )
}
