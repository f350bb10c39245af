//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Generate the file set for a request
//! 2. Check the whole batch against what is already on disk
//! 3. Write to filesystem, rolling back on failure
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    application::{ApplicationError, GenerationService, ports::Filesystem},
    domain::{FileSet, GenerationRequest, Identifier},
    error::StrataResult,
};

/// How to treat files that already exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Write into an existing project root and replace existing files.
    pub overwrite: bool,
}

/// What a successful write did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteReport {
    pub root: PathBuf,
    /// Generated paths, relative to `root`, in write order.
    pub written: Vec<String>,
    /// How many of `written` replaced an existing file.
    pub overwritten: usize,
}

/// Main scaffolding service.
///
/// Orchestrates the generation, conflict check and writing workflow.
pub struct ScaffoldService {
    generator: GenerationService,
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    /// Create a new scaffold service writing through `filesystem`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use strata_core::application::{ScaffoldService, WriteOptions};
    /// use strata_core::domain::GenerationRequest;
    /// # fn filesystem() -> Box<dyn strata_core::application::Filesystem> { unimplemented!() }
    ///
    /// let service = ScaffoldService::new(filesystem());
    /// let report = service
    ///     .scaffold(&GenerationRequest::feature("task"), "./my_app", WriteOptions::default())
    ///     .unwrap();
    /// println!("wrote {} files", report.written.len());
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            generator: GenerationService::new(),
            filesystem,
        }
    }

    /// Generate without writing.
    pub fn plan(&self, request: &GenerationRequest) -> StrataResult<FileSet> {
        Ok(self.generator.generate(request)?)
    }

    /// Directory the request's files are written under. Projects get a new
    /// directory named after the package; everything else writes into
    /// `output_path` itself.
    pub fn target_root(
        &self,
        request: &GenerationRequest,
        output_path: impl AsRef<Path>,
    ) -> StrataResult<PathBuf> {
        let output_path = output_path.as_ref();
        if request.kind.creates_root() {
            let name = Identifier::parse(request.name.trim())?;
            Ok(output_path.join(name.snake()))
        } else {
            Ok(output_path.to_path_buf())
        }
    }

    /// Generate and write.
    ///
    /// This is the main use case.
    #[instrument(
        skip_all,
        fields(
            kind = %request.kind,
            name = %request.name,
            output_path = %output_path.as_ref().display()
        )
    )]
    pub fn scaffold(
        &self,
        request: &GenerationRequest,
        output_path: impl AsRef<Path>,
        options: WriteOptions,
    ) -> StrataResult<WriteReport> {
        info!("Scaffolding {} '{}'", request.kind, request.name);

        let files = self.plan(request)?;
        let root = self.target_root(request, output_path)?;
        let report = self.write(&files, &root, request.kind.creates_root(), options)?;

        info!(files = report.written.len(), "Scaffold completed successfully");
        Ok(report)
    }

    /// Write `files` under `root`.
    ///
    /// The whole batch is checked before the first write. With
    /// `new_root`, `root` itself must not exist yet.
    pub fn write(
        &self,
        files: &FileSet,
        root: &Path,
        new_root: bool,
        options: WriteOptions,
    ) -> StrataResult<WriteReport> {
        let root_exists = self.filesystem.exists(root);
        if new_root && root_exists && !options.overwrite {
            return Err(ApplicationError::ProjectExists {
                path: root.to_path_buf(),
            }
            .into());
        }

        let existing: Vec<PathBuf> = if root_exists {
            files
                .paths()
                .map(|p| root.join(p))
                .filter(|p| self.filesystem.exists(p))
                .collect()
        } else {
            Vec::new()
        };
        if !existing.is_empty() && !options.overwrite {
            return Err(ApplicationError::FileConflict { paths: existing }.into());
        }

        let mut created = Vec::new();
        match self.write_all(files, root, &existing, &mut created) {
            Ok(()) => {
                info!("Successfully wrote all files");
                Ok(WriteReport {
                    root: root.to_path_buf(),
                    written: files.paths().map(str::to_string).collect(),
                    overwritten: existing.len(),
                })
            }
            Err(e) => {
                warn!("Write failed, attempting rollback");
                self.rollback(root, !root_exists, &created);
                Err(e)
            }
        }
    }

    /// Write all entries, recording each file that did not exist before.
    fn write_all(
        &self,
        files: &FileSet,
        root: &Path,
        existing: &[PathBuf],
        created: &mut Vec<PathBuf>,
    ) -> StrataResult<()> {
        self.filesystem.create_dir_all(root)?;

        for entry in files {
            let path = root.join(&entry.path);

            // Ensure parent exists
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }

            self.filesystem.write_file(&path, &entry.content)?;
            if !existing.contains(&path) {
                created.push(path);
            }
        }

        Ok(())
    }

    /// Best-effort rollback on failure.
    ///
    /// A root this call created is removed entirely; otherwise only the
    /// files it created are. Replaced files keep their new content.
    fn rollback(&self, root: &Path, root_created: bool, created: &[PathBuf]) {
        if root_created {
            if let Err(e) = self.filesystem.remove_dir_all(root) {
                warn!(error = %e, path = %root.display(), "Rollback failed");
            } else {
                info!("Rollback successful");
            }
            return;
        }

        let mut failed = 0usize;
        for path in created {
            if let Err(e) = self.filesystem.remove_file(path) {
                warn!(error = %e, path = %path.display(), "Rollback failed");
                failed += 1;
            }
        }
        if failed == 0 {
            info!(removed = created.len(), "Rollback successful");
        }
    }
}
