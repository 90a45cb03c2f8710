//! Touchstone `.sNp` codec.

mod error;
mod parser;
mod writer;

pub use error::TouchstoneError;
pub use parser::{parse_touchstone, ports_from_path};
pub use writer::TouchstoneWriter;
