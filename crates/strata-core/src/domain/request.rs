//! The generation request value object.
//!
//! A [`GenerationRequest`] captures every decision for one generation call
//! as already-structured parameters. Field specs and method names stay as
//! the caller typed them; they are parsed when the request is resolved, so
//! a malformed value is reported before any template runs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::method_catalog::CatalogMethod;
use crate::domain::value_objects::{ArchitectureStyle, StateManagement, TargetKind};

pub const DEFAULT_ORGANIZATION: &str = "com.example";

/// Toggles shared by every target kind. Irrelevant ones are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    pub include_repository: bool,
    pub include_use_cases: bool,
    pub include_tests: bool,
    pub include_remote: bool,
    pub include_local: bool,
    pub use_value_type: bool,
    pub include_wire_codec: bool,
    pub architecture: ArchitectureStyle,
    pub state_management: StateManagement,
    pub organization: String,
    pub description: Option<String>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            include_repository: true,
            include_use_cases: true,
            include_tests: false,
            include_remote: true,
            include_local: true,
            use_value_type: false,
            include_wire_codec: true,
            architecture: ArchitectureStyle::default(),
            state_management: StateManagement::default(),
            organization: DEFAULT_ORGANIZATION.to_string(),
            description: None,
        }
    }
}

/// All parameters of one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub kind: TargetKind,
    pub name: String,
    /// `name:Type` specs for entities, models and feature entities.
    pub fields: Vec<String>,
    /// Repository method names; empty means the canonical five.
    pub methods: Vec<String>,
    /// Entity a standalone repository serves; defaults to the repository name.
    pub entity: Option<String>,
    /// Extra entities of a feature, each rendered as an entity + model pair.
    pub entities: Vec<String>,
    /// Features of a project.
    pub features: Vec<String>,
    pub options: GenerationOptions,
}

impl GenerationRequest {
    pub fn new(kind: TargetKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            fields: Vec::new(),
            methods: Vec::new(),
            entity: None,
            entities: Vec::new(),
            features: Vec::new(),
            options: GenerationOptions::default(),
        }
    }

    pub fn entity(name: impl Into<String>) -> Self {
        Self::new(TargetKind::Entity, name)
    }

    pub fn model(name: impl Into<String>) -> Self {
        Self::new(TargetKind::Model, name)
    }

    pub fn repository(name: impl Into<String>) -> Self {
        Self::new(TargetKind::Repository, name)
    }

    pub fn feature(name: impl Into<String>) -> Self {
        Self::new(TargetKind::Feature, name)
    }

    pub fn project(name: impl Into<String>) -> Self {
        Self::new(TargetKind::Project, name)
    }

    // ── Builder-style setters ────────────────────────────────────────────

    #[must_use]
    pub fn with_field(mut self, spec: impl Into<String>) -> Self {
        self.fields.push(spec.into());
        self
    }

    #[must_use]
    pub fn with_fields<I, S>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(specs.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_methods<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_entity_name(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    #[must_use]
    pub fn with_entities<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entities.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_features<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn repository_enabled(mut self, enabled: bool) -> Self {
        self.options.include_repository = enabled;
        self
    }

    #[must_use]
    pub fn use_cases_enabled(mut self, enabled: bool) -> Self {
        self.options.include_use_cases = enabled;
        self
    }

    #[must_use]
    pub fn tests_enabled(mut self, enabled: bool) -> Self {
        self.options.include_tests = enabled;
        self
    }

    #[must_use]
    pub fn data_sources(mut self, remote: bool, local: bool) -> Self {
        self.options.include_remote = remote;
        self.options.include_local = local;
        self
    }

    #[must_use]
    pub fn value_type(mut self, enabled: bool) -> Self {
        self.options.use_value_type = enabled;
        self
    }

    #[must_use]
    pub fn wire_codec(mut self, enabled: bool) -> Self {
        self.options.include_wire_codec = enabled;
        self
    }

    #[must_use]
    pub fn architecture(mut self, style: ArchitectureStyle) -> Self {
        self.options.architecture = style;
        self
    }

    #[must_use]
    pub fn state_management(mut self, style: StateManagement) -> Self {
        self.options.state_management = style;
        self
    }

    #[must_use]
    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.options.organization = organization.into();
        self
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// Non-fatal findings about this request.
    ///
    /// Repository method names outside the catalog are still generated, as
    /// stubs, and reported here so the caller can tell the user.
    pub fn warnings(&self) -> Vec<GenerationWarning> {
        if self.kind != TargetKind::Repository {
            return Vec::new();
        }
        self.methods
            .iter()
            .filter(|name| CatalogMethod::lookup(name).is_none())
            .map(|name| GenerationWarning::UnknownMethod {
                name: name.trim().to_string(),
                repository: self.name.clone(),
            })
            .collect()
    }
}

/// Something worth telling the user that does not stop generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationWarning {
    UnknownMethod { name: String, repository: String },
}

impl fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownMethod { name, repository } => write!(
                f,
                "'{name}' is not a catalog method; {repository} gets a stub that throws UnimplementedError"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_toggles() {
        let req = GenerationRequest::feature("task");
        assert!(req.options.include_repository);
        assert!(req.options.include_use_cases);
        assert!(!req.options.include_tests);
        assert_eq!(req.options.organization, "com.example");
    }

    #[test]
    fn unknown_methods_are_warnings() {
        let req = GenerationRequest::repository("Order").with_methods(["getAll", "archive"]);
        let warnings = req.warnings();
        assert_eq!(
            warnings,
            [GenerationWarning::UnknownMethod {
                name: "archive".into(),
                repository: "Order".into()
            }]
        );
        assert!(warnings[0].to_string().contains("UnimplementedError"));
    }

    #[test]
    fn non_repository_requests_have_no_warnings() {
        let req = GenerationRequest::feature("task").with_methods(["archive"]);
        assert!(req.warnings().is_empty());
    }

    #[test]
    fn builder_collects_values() {
        let req = GenerationRequest::model("User")
            .with_field("email:String")
            .with_fields(["age:int?"])
            .value_type(true)
            .wire_codec(false);
        assert_eq!(req.fields, ["email:String", "age:int?"]);
        assert!(req.options.use_value_type);
        assert!(!req.options.include_wire_codec);
    }
}
