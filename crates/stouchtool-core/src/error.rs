//! Unified error handling for stouchtool Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for stouchtool Core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StouchError {
    /// Errors from the domain layer (precondition or model violations).
    ///
    /// Displayed transparently: the count-mismatch message is part of the
    /// tools' observable output.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl StouchError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Compatibility => ErrorCategory::Compatibility,
            },
            Self::Application(e) => e.category(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Io,
    Internal,
}

/// Convenient result type alias.
pub type StouchResult<T> = Result<T, StouchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_display_without_prefix() {
        let err: StouchError = DomainError::WrongFileCount {
            files: 2,
            requested: None,
        }
        .into();
        assert_eq!(err.to_string(), "Wrong number of files: 2");
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn application_category_passes_through() {
        let err: StouchError = ApplicationError::OutputRequired.into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.suggestions().is_empty());
    }
}
