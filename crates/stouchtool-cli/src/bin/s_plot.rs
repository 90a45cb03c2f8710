//! `s-plot`: plot S-parameter magnitudes of a Touchstone file to PDF.

use std::process::ExitCode;

use stouchtool_cli::cli::PlotCli;

fn main() -> ExitCode {
    stouchtool_cli::launch::<PlotCli>()
}
