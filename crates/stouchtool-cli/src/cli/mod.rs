//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, help
//! text and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── s-cat ─────────────────────────────────────────────────────────────────────

/// Concatenate 2-port Touchstone files into one N-port file.
#[derive(Debug, Parser)]
#[command(
    name     = "s-cat",
    bin_name = "s-cat",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Concatenate 2-port Touchstone files into one N-port file",
    long_about = "Combines C(N,2) two-port measurements into one N-port network. \
                  Files are assigned to port pairs in the order \
                  p12, p13, ..., p1N, p23, ..., p(N-1)N.",
    after_help = "EXAMPLES:\n\
        \x20 s-cat dut_p12.s2p dut_p13.s2p dut_p23.s2p\n\
        \x20 s-cat -p 3 -o dut.s3p dut_p12.s2p dut_p13.s2p dut_p23.s2p",
)]
pub struct CatCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// 2-port files, in port-pair order.
    #[arg(value_name = "FILE", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Port count of the result; inferred from the file count when omitted.
    #[arg(short = 'p', long = "numports", value_name = "N")]
    pub numports: Option<usize>,

    /// Output file; derived from the first two file names when omitted.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

// ── s-plot ────────────────────────────────────────────────────────────────────

/// Plot the S-parameter magnitudes of a Touchstone file to PDF.
#[derive(Debug, Parser)]
#[command(
    name     = "s-plot",
    bin_name = "s-plot",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Plot the S-parameters of a Touchstone file to PDF",
    after_help = "EXAMPLES:\n\
        \x20 s-plot limiter.s2p\n\
        \x20 s-plot -t \"Eval board\" -o board.pdf evalboard.s3p",
)]
pub struct PlotCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Touchstone file with any number of ports.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// PDF file; defaults to the input with a `.pdf` extension.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Chart title; defaults to the input's base name.
    #[arg(short = 't', long = "title", value_name = "TITLE")]
    pub title: Option<String>,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        CatCli::command().debug_assert();
        PlotCli::command().debug_assert();
    }

    #[test]
    fn cli_version_matches_cargo() {
        assert_eq!(CatCli::command().get_version(), Some(env!("CARGO_PKG_VERSION")));
        assert_eq!(PlotCli::command().get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn parse_cat_with_options() {
        let cli = CatCli::parse_from(["s-cat", "-p", "3", "-o", "out.s3p", "a.s2p", "b.s2p", "c.s2p"]);
        assert_eq!(cli.numports, Some(3));
        assert_eq!(cli.output, Some(PathBuf::from("out.s3p")));
        assert_eq!(cli.inputs.len(), 3);
        assert_eq!(cli.global.output_format, OutputFormat::Auto);
    }

    #[test]
    fn cat_needs_at_least_one_file() {
        let err = CatCli::try_parse_from(["s-cat"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn verbosity_counts() {
        let cli = PlotCli::parse_from(["s-plot", "-vv", "x.s2p"]);
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.input, PathBuf::from("x.s2p"));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = PlotCli::try_parse_from(["s-plot", "--quiet", "--verbose", "x.s2p"]);
        assert!(result.is_err());
    }

    #[test]
    fn plot_takes_exactly_one_file() {
        assert!(PlotCli::try_parse_from(["s-plot", "a.s2p", "b.s2p"]).is_err());
        assert!(PlotCli::try_parse_from(["s-plot"]).is_err());
    }
}
