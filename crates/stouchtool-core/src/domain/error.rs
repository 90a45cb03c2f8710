use thiserror::Error;

use crate::domain::value_objects::pair_count;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// No port count N satisfies C(N,2) == files.
    #[error("Wrong number of files: {files}")]
    WrongFileCount {
        files: usize,
        requested: Option<usize>,
    },

    #[error("Invalid port count {ports}: a network needs at least one port")]
    InvalidPortCount { ports: usize },

    #[error("Invalid port pair ({out}, {input}) for a {ports}-port network")]
    InvalidPortPair {
        out: usize,
        input: usize,
        ports: usize,
    },

    #[error("Invalid network: {0}")]
    InvalidNetwork(String),

    #[error("Invalid frequency sweep: {0}")]
    InvalidFrequency(String),

    // ========================================================================
    // Compatibility Errors
    // ========================================================================
    #[error("Network for {pair} has {ports} ports, expected a 2-port")]
    NotTwoPort { pair: String, ports: usize },

    #[error("Network for {pair} does not share the frequency sweep of the first network: {reason}")]
    FrequencyMismatch { pair: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::WrongFileCount { files, requested } => {
                let mut out = vec![
                    "An N-port needs one 2-port file per port pair: N*(N-1)/2 files".into(),
                    "Valid counts: 1 (2 ports), 3 (3 ports), 6 (4 ports), 10 (5 ports), 15 (6 ports)"
                        .into(),
                ];
                if let Some((ports, needed)) =
                    requested.and_then(|ports| pair_count(ports).map(|n| (ports, n)))
                {
                    out.push(format!("A {ports}-port needs {needed} files, got {files}"));
                }
                out
            }
            Self::InvalidPortCount { .. } => vec!["Pass a port count of at least 1".into()],
            Self::NotTwoPort { pair, .. } => vec![
                format!("The file mapped to {pair} must be a .s2p measurement"),
                "Check the order of the input files".into(),
            ],
            Self::FrequencyMismatch { .. } => vec![
                "All 2-port measurements must share the same frequency points".into(),
                "Re-measure or resample the files onto a common sweep".into(),
            ],
            _ => vec!["Check the input data".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::WrongFileCount { .. }
            | Self::InvalidPortCount { .. }
            | Self::InvalidPortPair { .. }
            | Self::InvalidNetwork(_)
            | Self::InvalidFrequency(_) => ErrorCategory::Validation,
            Self::NotTwoPort { .. } | Self::FrequencyMismatch { .. } => {
                ErrorCategory::Compatibility
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
}
