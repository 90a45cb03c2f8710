//! # stouchtool CLI
//!
//! Shared startup for the `s-cat` and `s-plot` binaries.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (file + env + defaults).
//! 4. Build the [`OutputManager`].
//! 5. Run the tool.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                               |
//! |------|---------------------------------------|
//! |  0   | Success                               |
//! |  1   | Load, validation, write or render failure |
//! |  2   | Argument error (clap)                 |
//! |  4   | Configuration error                   |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};

use crate::{
    cli::{CatCli, GlobalArgs, PlotCli},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::{LogSettings, Verbosity, init_logging},
    output::OutputManager,
};

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;

/// A parsed tool invocation.
pub trait Invocation {
    /// Flags shared by both tools.
    fn global(&self) -> &GlobalArgs;

    /// Run the tool to completion.
    fn execute(self, config: &AppConfig, output: &OutputManager) -> CliResult<()>;
}

impl Invocation for CatCli {
    fn global(&self) -> &GlobalArgs {
        &self.global
    }

    fn execute(self, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
        commands::cat::execute(self, config, output)
    }
}

impl Invocation for PlotCli {
    fn global(&self) -> &GlobalArgs {
        &self.global
    }

    fn execute(self, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
        commands::plot::execute(self, config, output)
    }
}

/// Entry point shared by the binaries.
pub fn launch<I: Parser + Invocation>() -> ExitCode {
    // Silently ignored if .env doesn't exist.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    // Help and version exit 0 on stdout; usage errors exit 2 on stderr.
    let invocation = I::try_parse().unwrap_or_else(|e| e.exit());
    let global = invocation.global().clone();
    let verbosity = Verbosity::from_args(&global);

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(LogSettings::from_args(&global)) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = global.verbose,
        quiet = global.quiet,
        no_color = global.no_color,
        "CLI started"
    );

    // ── 3. Load configuration ─────────────────────────────────────────────
    let config = match AppConfig::load(global.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            let output = OutputManager::new(&global, &AppConfig::default());
            return handle_error(CliError::from(e), &output, verbosity);
        }
    };

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&global, &config);

    // ── 5. Run + 6. Error handling ────────────────────────────────────────
    match invocation.execute(&config, &output) {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, &output, verbosity),
    }
}

/// Translate a `CliError` into a user message and an exit code.
///
/// The report goes to stdout alongside the summary line.
fn handle_error(err: CliError, output: &OutputManager, verbosity: Verbosity) -> ExitCode {
    err.log();

    let verbose = verbosity.shows_causes();
    let msg = if output.supports_color() {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    if output.report_error(&msg).is_err() {
        eprint!("{msg}");
    }

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_exposes_global_flags() {
        let cli = CatCli::try_parse_from(["s-cat", "-q", "a.s2p", "b.s2p", "c.s2p"]).unwrap();
        assert!(cli.global().quiet);

        let cli = PlotCli::try_parse_from(["s-plot", "-vv", "x.s2p"]).unwrap();
        assert_eq!(cli.global().verbose, 2);
    }
}
