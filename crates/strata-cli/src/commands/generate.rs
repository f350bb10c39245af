//! The plan, confirm and write flow shared by every generator command.
//!
//! Responsibility: turn a finished `GenerationRequest` into files on disk
//! through the core scaffold service, and report what happened. Commands
//! only build the request.

use std::io::IsTerminal as _;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, instrument};

use strata_adapters::LocalFilesystem;
use strata_core::{
    application::{ScaffoldService, WriteOptions, WriteReport},
    domain::{FileSet, GenerationRequest, GenerationWarning, TargetKind},
};

use crate::{
    cli::{GlobalArgs, WriteArgs},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct PlannedFile<'a> {
    path: &'a str,
    bytes: usize,
}

/// Dry-run payload for `--output-format json`.
#[derive(Debug, Serialize)]
struct Plan<'a> {
    kind: TargetKind,
    name: &'a str,
    root: &'a Path,
    files: Vec<PlannedFile<'a>>,
    total_bytes: usize,
    warnings: &'a [GenerationWarning],
}

/// Write payload for `--output-format json`.
#[derive(Debug, Serialize)]
struct Outcome<'a> {
    kind: TargetKind,
    name: &'a str,
    #[serde(flatten)]
    report: &'a WriteReport,
    warnings: &'a [GenerationWarning],
}

/// Generate `request` and write it under `--output`.
///
/// Returns `None` for a dry run.
#[instrument(skip_all, fields(kind = %request.kind, name = %request.name))]
pub fn run(
    request: &GenerationRequest,
    write: &WriteArgs,
    global: &GlobalArgs,
    output: &OutputManager,
) -> CliResult<Option<WriteReport>> {
    let output_dir = write.output_dir();
    if !request.kind.creates_root() && !output_dir.is_dir() {
        return Err(CliError::InvalidInput {
            message: format!("output directory '{}' does not exist", output_dir.display()),
            source: None,
        });
    }

    let warnings = request.warnings();
    if !output.is_json() {
        for warning in &warnings {
            output.warning(&warning.to_string())?;
        }
    }

    let service = ScaffoldService::new(Box::new(LocalFilesystem::new()));
    let files = service
        .plan(request)
        .with_cli_context(|| format!("generating {} '{}'", request.kind, request.name))?;
    let root = service.target_root(request, &output_dir)?;
    debug!(files = files.len(), root = %root.display(), "Plan ready");

    if write.dry_run {
        print_plan(request, &files, &root, &warnings, output)?;
        return Ok(None);
    }

    if needs_confirmation(write, global, output) {
        show_summary(request, &files, &root, output)?;
        if !confirm(&format!("Write {} files?", files.len()))? {
            return Err(CliError::Cancelled);
        }
    }

    let spinner = output.spinner(&format!("Writing {} files...", files.len()));
    let result = service.write(
        &files,
        &root,
        request.kind.creates_root(),
        WriteOptions {
            overwrite: write.force,
        },
    );
    spinner.finish_and_clear();
    let report = result.with_cli_context(|| format!("writing into {}", root.display()))?;

    info!(
        files = report.written.len(),
        overwritten = report.overwritten,
        "Write completed"
    );

    if output.is_json() {
        output.json(&Outcome {
            kind: request.kind,
            name: &request.name,
            report: &report,
            warnings: &warnings,
        })?;
    } else {
        output.success(&format!(
            "Generated {} '{}' ({} files in {})",
            request.kind,
            request.name.trim(),
            report.written.len(),
            report.root.display(),
        ))?;
        for path in &report.written {
            output.detail(&format!("  {path}"))?;
        }
        if report.overwritten > 0 {
            output.warning(&format!(
                "{} existing file(s) overwritten",
                report.overwritten
            ))?;
        }
    }

    Ok(Some(report))
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn print_plan(
    request: &GenerationRequest,
    files: &FileSet,
    root: &Path,
    warnings: &[GenerationWarning],
    out: &OutputManager,
) -> CliResult<()> {
    if out.is_json() {
        let plan = Plan {
            kind: request.kind,
            name: &request.name,
            root,
            files: files
                .iter()
                .map(|entry| PlannedFile {
                    path: &entry.path,
                    bytes: entry.size(),
                })
                .collect(),
            total_bytes: files.total_bytes(),
            warnings,
        };
        out.json(&plan)?;
        return Ok(());
    }

    out.info(&format!(
        "Dry run: would write {} files to {}",
        files.len(),
        root.display()
    ))?;
    let width = files.paths().map(str::len).max().unwrap_or(0);
    for entry in files {
        out.print(&format!(
            "  {:<width$}  {:>6} B",
            entry.path,
            entry.size(),
            width = width
        ))?;
    }
    out.print(&format!("  total {} bytes", files.total_bytes()))?;
    Ok(())
}

fn show_summary(
    request: &GenerationRequest,
    files: &FileSet,
    root: &Path,
    out: &OutputManager,
) -> CliResult<()> {
    let options = &request.options;
    out.header("Configuration")?;
    out.print(&format!("  Kind:         {}", request.kind))?;
    out.print(&format!("  Name:         {}", request.name.trim()))?;
    if matches!(request.kind, TargetKind::Project | TargetKind::Feature) {
        out.print(&format!("  Architecture: {}", options.architecture))?;
        out.print(&format!("  State:        {}", options.state_management))?;
    }
    if request.kind == TargetKind::Project {
        out.print(&format!("  Organization: {}", options.organization))?;
    }
    out.print(&format!("  Files:        {}", files.len()))?;
    out.print(&format!("  Location:     {}", root.display()))?;
    out.print("")?;
    Ok(())
}

fn needs_confirmation(write: &WriteArgs, global: &GlobalArgs, output: &OutputManager) -> bool {
    !write.yes
        && !global.quiet
        && !output.is_json()
        && std::io::stdin().is_terminal()
        && std::io::stderr().is_terminal()
}

#[cfg(feature = "interactive")]
fn confirm(prompt: &str) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e.into(),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm(_prompt: &str) -> CliResult<bool> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
