//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            term: Term::stdout(),
        }
    }

    /// Final summary of a run: the message line, or a JSON object carrying
    /// the message and `details`. Suppressed in quiet mode.
    pub fn summary<T: Serialize>(&self, message: &str, details: &T) -> io::Result<()> {
        match self.summary_line(message, details)? {
            Some(line) => self.term.write_line(&line),
            None => Ok(()),
        }
    }

    /// The line [`Self::summary`] prints, `None` in quiet mode.
    fn summary_line<T: Serialize>(
        &self,
        message: &str,
        details: &T,
    ) -> io::Result<Option<String>> {
        if self.quiet {
            return Ok(None);
        }
        let line = match self.resolved_format {
            OutputFormat::Json => serde_json::to_string(&serde_json::json!({
                "message": message,
                "result": details,
            }))
            .map_err(io::Error::other)?,
            OutputFormat::Human => self.success(message),
            OutputFormat::Auto | OutputFormat::Plain => message.to_owned(),
        };
        Ok(Some(line))
    }

    /// Success indicator: `✓ <msg>`.
    fn success(&self, msg: &str) -> String {
        if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        }
    }

    /// Error report. *Not* suppressed in quiet mode.
    pub fn report_error(&self, text: &str) -> io::Result<()> {
        self.term.write_str(text)
    }

    /// `true` if ANSI colours are enabled and stdout is a terminal.
    pub fn supports_color(&self) -> bool {
        !self.no_color && io::stdout().is_terminal()
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(quiet: bool, no_color: bool, output_format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[derive(Serialize)]
    struct Details {
        ports: usize,
    }

    #[test]
    fn quiet_suppresses_summary() {
        for format in [OutputFormat::Plain, OutputFormat::Human, OutputFormat::Json] {
            let out = make_manager(true, true, format);
            assert_eq!(out.summary_line("hello", &Details { ports: 3 }).unwrap(), None);
        }
    }

    #[test]
    fn plain_summary_is_the_message() {
        let out = make_manager(false, true, OutputFormat::Plain);
        assert_eq!(
            out.summary_line("hello", &Details { ports: 3 }).unwrap(),
            Some("hello".to_owned())
        );
    }

    #[test]
    fn human_summary_has_a_check_mark() {
        let out = make_manager(false, true, OutputFormat::Human);
        assert_eq!(
            out.summary_line("hello", &Details { ports: 3 }).unwrap(),
            Some("\u{2713} hello".to_owned())
        );
    }

    #[test]
    fn json_summary_wraps_details() {
        let out = make_manager(false, true, OutputFormat::Json);
        let line = out
            .summary_line("hello", &Details { ports: 3 })
            .unwrap()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["message"], "hello");
        assert_eq!(value["result"]["ports"], 3);
    }

    #[test]
    fn config_can_disable_color() {
        let mut config = AppConfig::default();
        config.output.no_color = true;
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Human,
        };
        assert!(!OutputManager::new(&args, &config).supports_color());
    }
}
