//! `s-cat`: concatenate 2-port Touchstone files into one N-port file.

use std::process::ExitCode;

use stouchtool_cli::cli::CatCli;

fn main() -> ExitCode {
    stouchtool_cli::launch::<CatCli>()
}
