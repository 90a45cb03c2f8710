//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stouchtool-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{LabeledNetwork, Network, PortCount, SParameterChart};
use crate::error::StouchResult;

/// Port for reading a network file.
///
/// Implemented by:
/// - `stouchtool_adapters::store::TouchstoneFiles` (production)
/// - `stouchtool_adapters::store::MemoryNetworkStore` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait NetworkLoader: Send + Sync {
    fn load(&self, path: &Path) -> StouchResult<Network>;
}

/// Port for writing a network file.
///
/// Implemented by:
/// - `stouchtool_adapters::store::TouchstoneFiles` (production)
/// - `stouchtool_adapters::store::MemoryNetworkStore` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait NetworkWriter: Send + Sync {
    fn write(&self, network: &Network, path: &Path) -> StouchResult<()>;
}

/// Port for embedding labeled 2-port measurements into one N-port.
///
/// Implemented by `stouchtool_adapters::PairwiseCombiner`.
#[cfg_attr(test, mockall::automock)]
pub trait NetworkCombiner: Send + Sync {
    /// `parts` arrive in file order, already zipped with their port pairs.
    fn combine(&self, parts: &[LabeledNetwork], ports: PortCount) -> StouchResult<Network>;
}

/// Port for drawing a chart to a file.
///
/// Implemented by `stouchtool_adapters::chart::PdfChartRenderer`.
#[cfg_attr(test, mockall::automock)]
pub trait ChartRenderer: Send + Sync {
    fn render(&self, chart: &SParameterChart, path: &Path) -> StouchResult<()>;
}
