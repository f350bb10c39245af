//! Application layer errors.
//!
//! These errors represent failures while writing generated files, not
//! generation itself. Generation errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while putting a generated [`FileSet`](crate::domain::FileSet) on disk.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// An in-memory adapter's lock was poisoned by a panicking writer.
    #[error("Filesystem lock poisoned")]
    LockPoisoned,

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// Generated files would overwrite existing ones.
    #[error("{} file(s) already exist: {}", paths.len(), list_paths(paths))]
    FileConflict { paths: Vec<PathBuf> },

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },
}

fn list_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ApplicationError {
    pub fn filesystem(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::FilesystemError {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::LockPoisoned => vec!["Try again; a previous write panicked".into()],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use --force to write into it anyway".into(),
                "Choose a different project name or --output directory".into(),
            ],
            Self::FileConflict { .. } => vec![
                "Use --force to overwrite the listed files".into(),
                "Use --dry-run to preview what would be written".into(),
            ],
            Self::RollbackFailed { path, .. } => vec![format!(
                "Remove partially written files under {} by hand",
                path.display()
            )],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::RollbackFailed { .. } | Self::LockPoisoned => {
                ErrorCategory::Internal
            }
            Self::ProjectExists { .. } | Self::FileConflict { .. } => ErrorCategory::Conflict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_lists_every_path() {
        let err = ApplicationError::FileConflict {
            paths: vec!["lib/a.dart".into(), "lib/b.dart".into()],
        };
        assert_eq!(
            err.to_string(),
            "2 file(s) already exist: lib/a.dart, lib/b.dart"
        );
        assert_eq!(err.category(), ErrorCategory::Conflict);
    }
}
