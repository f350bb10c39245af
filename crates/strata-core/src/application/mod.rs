//! Application layer for strata.
//!
//! This layer contains:
//! - **Services**: generation and writing (GenerationService, ScaffoldService)
//! - **Ports**: the filesystem trait the writer depends on
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! generation logic itself. Templates live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{GenerationService, ScaffoldService, WriteOptions, WriteReport};

pub use ports::Filesystem;

pub use error::ApplicationError;
