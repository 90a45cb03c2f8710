//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the two
//! use cases: "concatenate 2-port files" and "plot a network".

pub mod cat_service;
pub mod plot_service;

pub use cat_service::{CatReport, CatRequest, CatService};
pub use plot_service::{PlotReport, PlotRequest, PlotService};
