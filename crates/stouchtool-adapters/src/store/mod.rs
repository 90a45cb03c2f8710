//! Network loaders and writers.

mod local;
mod memory;

pub use local::TouchstoneFiles;
pub use memory::MemoryNetworkStore;
