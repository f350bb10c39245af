//! strata core - layered Flutter feature generation
//!
//! This crate provides the domain and application layers for the strata
//! scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           strata-cli (CLI)              │
//! │     (Builds GenerationRequests)         │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (GenerationService, ScaffoldService)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │            (Filesystem)                 │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     strata-adapters (Infrastructure)    │
//! │   (LocalFilesystem, MemoryFilesystem)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Identifier, FieldSpec, templates)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use strata_core::domain::GenerationRequest;
//!
//! let files = strata_core::generate(
//!     &GenerationRequest::feature("task").with_field("title:String"),
//! )
//! .unwrap();
//! assert!(files.contains("lib/features/task/domain/entities/task_entity.dart"));
//! ```

pub mod domain;

pub mod application;

pub mod error;

use crate::domain::{DomainError, FileSet, GenerationRequest};

/// The types most callers need, in one import.
pub mod prelude {
    pub use crate::application::{
        ApplicationError, GenerationService, ScaffoldService, WriteOptions, WriteReport,
        ports::Filesystem,
    };
    pub use crate::domain::{
        ArchitectureStyle, CatalogMethod, DomainError, FieldSpec, FileSet, GenerationOptions,
        GenerationRequest, GenerationWarning, Identifier, StateManagement, TargetKind,
    };
    pub use crate::error::{StrataError, StrataResult};
}

/// Render every file for `request` without touching the filesystem.
///
/// Shorthand for [`GenerationService::generate`](application::GenerationService::generate).
pub fn generate(request: &GenerationRequest) -> Result<FileSet, DomainError> {
    application::GenerationService::new().generate(request)
}
