//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use strata_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{StrataError, StrataResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> StrataResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> StrataResult<()> {
        tracing::trace!(path = %path.display(), bytes = content.len(), "write");
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_file(&self, path: &Path) -> StrataResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn remove_dir_all(&self, path: &Path) -> StrataResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> StrataError {
    ApplicationError::filesystem(path, format!("Failed to {operation}: {e}")).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_removes_files() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        let nested = dir.path().join("lib/core");
        let file = nested.join("app_config.dart");

        fs.create_dir_all(&nested).unwrap();
        fs.write_file(&file, "abstract final class AppConfig {}\n").unwrap();
        assert!(fs.exists(&file));
        assert_eq!(
            std::fs::read_to_string(&file).unwrap(),
            "abstract final class AppConfig {}\n"
        );

        fs.remove_file(&file).unwrap();
        assert!(!fs.exists(&file));
        fs.remove_dir_all(&dir.path().join("lib")).unwrap();
        assert!(!fs.exists(&nested));
    }

    #[test]
    fn missing_parent_is_a_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalFilesystem::new()
            .write_file(&dir.path().join("missing/file.dart"), "")
            .unwrap_err();
        assert!(matches!(
            err,
            StrataError::Application(ApplicationError::FilesystemError { .. })
        ));
    }
}
