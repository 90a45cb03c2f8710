//! Core domain layer for stouchtool.
//!
//! Pure logic: port-count inference, port-pair enumeration, output naming,
//! the network model and the chart model. All file formats and rendering
//! are handled via ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: No filesystem calls
//! - **Immutable entities**: Domain objects are Clone + PartialEq
//! - **Validated construction**: `PortCount`, `PortPair`, `Frequency` and
//!   `Network` cannot be built in an invalid state
pub mod entities;
pub mod error;
pub mod naming;
pub mod value_objects;

mod validation;

pub use entities::{
    Frequency, LabeledNetwork, Network, SParameterChart, Trace, format_mhz,
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{DataFormat, FrequencyUnit, PortCount, PortPair};

pub use validation::DomainValidator;
