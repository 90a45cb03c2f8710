//! Tracing subscriber initialisation.
//!
//! Only the CLI crate calls [`init_logging`]; `stouchtool-core` and
//! `stouchtool-adapters` only *emit* spans and events.
//!
//! # Verbosity mapping
//!
//! | Flag(s)  | Filter level |
//! |----------|--------------|
//! | (none)   | WARN         |
//! | `-v`     | INFO         |
//! | `-vv`    | DEBUG        |
//! | `-vvv`   | TRACE        |
//! | `--quiet`| ERROR        |
//!
//! `RUST_LOG` overrides all of the above if set.

use std::fmt;
use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Log verbosity selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Normal,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// `--quiet` wins over any number of `-v`.
    pub fn from_args(args: &GlobalArgs) -> Self {
        if args.quiet {
            return Self::Quiet;
        }
        match args.verbose {
            0 => Self::Normal,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    pub fn level(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Whether error reports include their cause chain.
    pub fn shows_causes(self) -> bool {
        self >= Self::Info
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.level())
    }
}

/// Logging setup derived from the parsed arguments.
#[derive(Debug, Clone, Copy)]
pub struct LogSettings {
    pub verbosity: Verbosity,
    pub ansi: bool,
}

impl LogSettings {
    pub fn from_args(args: &GlobalArgs) -> Self {
        Self {
            verbosity: Verbosity::from_args(args),
            // Detect colour support via the stdlib.
            ansi: !args.no_color && std::io::stderr().is_terminal(),
        }
    }

    fn filter_directives(&self) -> String {
        let level = self.verbosity.level();
        format!("stouchtool_cli={level},stouchtool_core={level},stouchtool_adapters={level}")
    }
}

/// Install the global tracing subscriber, writing to stderr.
///
/// Must be called exactly once, before any tracing macros fire.
pub fn init_logging(settings: LogSettings) -> anyhow::Result<()> {
    // RUST_LOG wins; otherwise every workspace crate gets the same level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.filter_directives()));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(settings.ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}
