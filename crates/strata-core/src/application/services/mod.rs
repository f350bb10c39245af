//! Application services - orchestrate use cases.
//!
//! [`GenerationService`] turns a request into a [`FileSet`](crate::domain::FileSet);
//! [`ScaffoldService`] writes that set through the [`Filesystem`](super::Filesystem) port.

pub mod generation_service;
pub mod scaffold_service;

pub use generation_service::GenerationService;
pub use scaffold_service::{ScaffoldService, WriteOptions, WriteReport};
