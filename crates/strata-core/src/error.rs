//! The error type returned across the crate boundary.
//!
//! [`StrataError`] folds domain failures (bad names, field specs, options)
//! and application failures (conflicts, filesystem) into one type, and
//! gives callers a category plus advice to print.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{self, DomainError};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StrataError {
    /// The request was rejected before anything was rendered.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Rendering succeeded but the files could not be written.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

pub type StrataResult<T> = Result<T, StrataError>;

/// Coarse classification callers map onto exit codes or styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    /// Output would clobber existing files.
    Conflict,
    Internal,
}

impl StrataError {
    /// Short, actionable hints for the user.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec!["Re-run with -vv and include the log in a bug report".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                domain::ErrorCategory::Validation => ErrorCategory::Validation,
                domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn domain_errors_are_validation() {
        let err: StrataError = DomainError::MalformedFieldSpec {
            spec: "badspec".into(),
            reason: "missing ':' separator".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.to_string().contains("badspec"));
    }

    #[test]
    fn conflicts_keep_their_own_category() {
        let err = StrataError::from(ApplicationError::FileConflict {
            paths: vec![PathBuf::from("lib/a.dart"), PathBuf::from("lib/b.dart")],
        });
        assert_eq!(err.category(), ErrorCategory::Conflict);
        assert_eq!(
            err.to_string(),
            "2 file(s) already exist: lib/a.dart, lib/b.dart"
        );
    }

    #[test]
    fn poisoned_lock_is_internal() {
        let err = StrataError::from(ApplicationError::LockPoisoned);
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(!err.suggestions().is_empty());
    }
}
