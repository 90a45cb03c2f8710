use std::path::PathBuf;

use stouchtool_core::domain::DomainError;
use thiserror::Error;

/// Failures of the Touchstone codec.
#[derive(Debug, Error)]
pub enum TouchstoneError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot tell the port count of '{name}': expected a .sNp extension")]
    BadExtension { name: String },

    #[error("line {line}: malformed option line: {reason}")]
    BadOptionLine { line: usize, reason: String },

    #[error("line {line}: '{token}' is not a number")]
    BadNumber { line: usize, token: String },

    #[error("line {line}: malformed keyword: {reason}")]
    BadKeyword { line: usize, reason: String },

    #[error("unsupported {what}: {value}")]
    Unsupported { what: &'static str, value: String },

    #[error("data ends inside a frequency point: {extra} trailing values for a {ports}-port")]
    Truncated { extra: usize, ports: usize },

    #[error("file contains no network data")]
    NoData,

    #[error("[Number of Frequencies] declares {declared} points, found {found}")]
    FrequencyCount { declared: usize, found: usize },

    #[error(transparent)]
    Network(#[from] DomainError),
}
