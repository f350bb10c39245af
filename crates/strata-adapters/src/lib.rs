//! Infrastructure adapters for strata.
//!
//! This crate implements the ports defined in `strata-core::application::ports`.
//! It contains all filesystem I/O.

pub mod filesystem;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
