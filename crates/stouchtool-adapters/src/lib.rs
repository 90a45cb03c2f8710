//! Infrastructure adapters for stouchtool.
//!
//! This crate implements the ports defined in
//! `stouchtool-core::application::ports`. It contains all file formats and
//! I/O operations.

pub mod chart;
pub mod combiner;
pub mod store;
pub mod touchstone;

// Re-export commonly used adapters
pub use chart::{PageSize, PdfChartRenderer};
pub use combiner::PairwiseCombiner;
pub use store::{MemoryNetworkStore, TouchstoneFiles};
pub use touchstone::{TouchstoneError, TouchstoneWriter, parse_touchstone, ports_from_path};
