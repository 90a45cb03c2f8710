//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the adapters
//! behind the ports, not model violations. Those are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A network file could not be read or parsed.
    #[error("Failed to load {path}: {reason}")]
    LoadFailed { path: PathBuf, reason: String },

    /// A network file could not be written.
    #[error("Failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    /// The chart could not be rendered or saved.
    #[error("Failed to render plot to {path}: {reason}")]
    RenderFailed { path: PathBuf, reason: String },

    /// No output path was given and none can be derived.
    #[error("An output path is required when concatenating a single file")]
    OutputRequired,

    /// Store access failed (lock poisoned).
    #[error("Network store error")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::LoadFailed { path, .. } => vec![
                format!("Check that {} exists and is readable", path.display()),
                "Touchstone files need a .sNp extension matching their port count".into(),
            ],
            Self::WriteFailed { path, .. } | Self::RenderFailed { path, .. } => vec![
                format!("Failed to write: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::OutputRequired => vec![
                "The output name is derived from the first two inputs".into(),
                "Pass -o/--output to name the result".into(),
            ],
            Self::StoreLockError => vec!["Try again".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::LoadFailed { .. } => ErrorCategory::NotFound,
            Self::WriteFailed { .. } | Self::RenderFailed { .. } => ErrorCategory::Io,
            Self::OutputRequired => ErrorCategory::Validation,
            Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
