//! stouchtool Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the stouchtool
//! Touchstone utilities, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      stouchtool-cli (s-cat, s-plot)     │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │        (CatService, PlotService)        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │  (Loader, Writer, Combiner, Renderer)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   stouchtool-adapters (Infrastructure)  │
//! │ (Touchstone codec, combiner, PDF chart) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (PortCount, PortPair, Network, Chart)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stouchtool_core::application::{CatRequest, CatService};
//!
//! // Adapters come from `stouchtool-adapters`.
//! let service = CatService::new(loader, writer, combiner);
//! let report = service.cat(CatRequest::new(vec!["a.s2p".into(), "b.s2p".into(), "c.s2p".into()]))?;
//! println!("{}", report.output.display());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CatReport, CatRequest, CatService, PlotReport, PlotRequest, PlotService,
        ports::{ChartRenderer, NetworkCombiner, NetworkLoader, NetworkWriter},
    };
    pub use crate::domain::{
        DataFormat, Frequency, FrequencyUnit, LabeledNetwork, Network, PortCount, PortPair,
        SParameterChart, Trace,
    };
    pub use crate::error::{StouchError, StouchResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
