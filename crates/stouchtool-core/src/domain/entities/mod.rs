pub mod chart;
pub mod network;

pub use chart::{SParameterChart, Trace, format_mhz};
pub use network::{Frequency, LabeledNetwork, Network};
