//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stouchtool-adapters` implement
//! these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `NetworkLoader`: Read a network file
//!   - `NetworkWriter`: Write a network file
//!   - `NetworkCombiner`: Embed 2-ports into an N-port
//!   - `ChartRenderer`: Draw a chart to a file
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (The `s-cat` and `s-plot` binaries call the services directly)

pub mod output;

pub use output::{ChartRenderer, NetworkCombiner, NetworkLoader, NetworkWriter};

#[cfg(test)]
pub use output::{MockChartRenderer, MockNetworkCombiner, MockNetworkLoader, MockNetworkWriter};
