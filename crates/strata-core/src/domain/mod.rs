//! Core domain layer for strata.
//!
//! Pure generation logic: names, field specs, the repository method
//! catalog and the Dart templates. Nothing in here touches the filesystem;
//! every template returns a [`FileSet`] for the application layer to write.
//!
//! - **No I/O**: templates are functions from parameters to text
//! - **No async**: rendering is synchronous
//! - **Fail early**: every error is raised before any output exists

pub mod common;
pub mod error;
pub mod field_spec;
pub mod file_set;
pub mod method_catalog;
pub mod naming;
pub mod request;
pub mod templates;
pub mod validation;
pub mod value_objects;

pub use common::RelativePath;
pub use error::{DomainError, ErrorCategory};
pub use field_spec::FieldSpec;
pub use file_set::{FileEntry, FileSet};
pub use method_catalog::{
    CatalogMethod, Coordination, DEFAULT_METHODS, METHOD_CATALOG, MethodDef, RepositoryMethod,
    resolve_methods,
};
pub use naming::{
    Identifier, pluralize, to_camel_case, to_pascal_case, to_sentence_case, to_snake_case,
};
pub use request::{DEFAULT_ORGANIZATION, GenerationOptions, GenerationRequest, GenerationWarning};
pub use templates::{
    EntityTemplate, FeatureTemplate, ModelTemplate, ProjectTemplate, RepositoryTemplate,
};
pub use validation::DomainValidator;
pub use value_objects::{ArchitectureStyle, ModelStyle, StateManagement, TargetKind};
