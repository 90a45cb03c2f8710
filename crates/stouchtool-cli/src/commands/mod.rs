//! Tool handlers.

pub mod cat;
pub mod plot;
