//! Plot Service - render the S-parameter magnitudes of one network.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    application::ports::{ChartRenderer, NetworkLoader},
    domain::{SParameterChart, naming},
    error::StouchResult,
};

/// Inputs of one plot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotRequest {
    pub input: PathBuf,
    /// Defaults to the input with a `.pdf` extension.
    pub output: Option<PathBuf>,
    /// Defaults to the input's base name without extension.
    pub title: Option<String>,
}

impl PlotRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            title: None,
        }
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }
}

/// What a successful plot produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlotReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub ports: usize,
    pub title: String,
}

/// Plotting service.
pub struct PlotService {
    loader: Box<dyn NetworkLoader>,
    renderer: Box<dyn ChartRenderer>,
}

impl PlotService {
    pub fn new(loader: Box<dyn NetworkLoader>, renderer: Box<dyn ChartRenderer>) -> Self {
        Self { loader, renderer }
    }

    /// Load the network and render every S-parameter to the output file.
    ///
    /// Nothing is written when the load fails.
    #[instrument(skip_all, fields(input = %request.input.display()))]
    pub fn plot(&self, request: PlotRequest) -> StouchResult<PlotReport> {
        let PlotRequest {
            input,
            output,
            title,
        } = request;

        let output = output.unwrap_or_else(|| naming::plot_output_path(&input));
        info!(output = %output.display(), "Output file");
        let title = title.unwrap_or_else(|| naming::plot_title(&input));
        info!(%title, "Plot title");

        let network = self.loader.load(&input)?;
        let ports = network.nports();
        info!(ports, points = network.nfreq(), "Network loaded");

        let chart = SParameterChart::from_network(&network, title.clone());
        self.renderer.render(&chart, &output)?;

        Ok(PlotReport {
            input,
            output,
            ports,
            title,
        })
    }
}
