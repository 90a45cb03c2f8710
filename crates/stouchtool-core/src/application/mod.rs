//! Application layer for stouchtool.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (CatService, PlotService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! rules of its own. Port counts, labels and names live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{CatReport, CatRequest, CatService, PlotReport, PlotRequest, PlotService};

pub use ports::{ChartRenderer, NetworkCombiner, NetworkLoader, NetworkWriter};

pub use error::ApplicationError;
