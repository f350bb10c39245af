//! One vertical feature slice.
//!
//! Composes the entity, model, repository, use case, state and
//! presentation templates under feature-relative paths:
//!
//! ```text
//! domain/entities/      always
//! data/models/          always
//! domain/repositories/  with a repository, or with use cases (interface only)
//! data/repositories/    with a repository
//! data/datasources/     with a repository, one per enabled source
//! domain/usecases/      with use cases (get, create, update, delete)
//! presentation/state/   always (state + notifier)
//! presentation/pages/   always
//! presentation/widgets/ always
//! ```

use crate::domain::error::DomainError;
use crate::domain::field_spec::{FieldSpec, default_entity_fields};
use crate::domain::file_set::FileSet;
use crate::domain::method_catalog::{DEFAULT_METHODS, RepositoryMethod};
use crate::domain::naming::Identifier;
use crate::domain::templates::presentation::PresentationTemplate;
use crate::domain::templates::repository::DataSources;
use crate::domain::templates::state::{NotifierBackend, render_notifier, render_state};
use crate::domain::templates::{
    EntityLink, EntityTemplate, ModelTemplate, RepositoryTemplate, paths, test_scaffold, usecase,
};
use crate::domain::value_objects::{ModelStyle, StateManagement};

#[derive(Debug, Clone)]
pub struct FeatureTemplate {
    base: Identifier,
    entity: EntityTemplate,
    extra_entities: Vec<EntityTemplate>,
    include_repository: bool,
    include_use_cases: bool,
    sources: DataSources,
    state_management: StateManagement,
    model_style: ModelStyle,
    wire_codec: bool,
}

impl FeatureTemplate {
    /// A feature with repository and use cases, riverpod state and the
    /// default entity fields.
    ///
    /// A trailing `Entity` is dropped from `name` so every layer derives its
    /// file names from the same stem as the entity module.
    pub fn new(name: &Identifier) -> Result<Self, DomainError> {
        let base = name.without_suffix("Entity");
        Ok(Self {
            entity: EntityTemplate::new(&base, Vec::new())?,
            base,
            extra_entities: Vec::new(),
            include_repository: true,
            include_use_cases: true,
            sources: DataSources::BOTH,
            state_management: StateManagement::default(),
            model_style: ModelStyle::default(),
            wire_codec: true,
        })
    }

    /// Fields of the feature's own entity and model.
    ///
    /// # Errors
    ///
    /// `DuplicateField` when two fields share a name, `InvalidRequest` when
    /// `id` is given with a type other than `String`.
    pub fn with_fields(mut self, fields: Vec<FieldSpec>) -> Result<Self, DomainError> {
        self.entity = EntityTemplate::new(&self.base, fields)?;
        Ok(self)
    }

    /// Extra entities, each rendered as an entity + model pair with the
    /// default fields. The feature's own name is skipped.
    pub fn with_entities(mut self, names: &[Identifier]) -> Result<Self, DomainError> {
        for name in names {
            let stripped = name.without_suffix("Entity");
            let already = stripped.snake() == self.base.snake()
                || self
                    .extra_entities
                    .iter()
                    .any(|e| e.base().snake() == stripped.snake());
            if !already {
                self.extra_entities
                    .push(EntityTemplate::new(&stripped, default_entity_fields())?);
            }
        }
        Ok(self)
    }

    #[must_use]
    pub fn repository(mut self, enabled: bool) -> Self {
        self.include_repository = enabled;
        self
    }

    #[must_use]
    pub fn use_cases(mut self, enabled: bool) -> Self {
        self.include_use_cases = enabled;
        self
    }

    /// Data sources behind the repository implementation.
    #[must_use]
    pub fn data_sources(mut self, sources: DataSources) -> Self {
        self.sources = sources;
        self
    }

    #[must_use]
    pub fn state_management(mut self, style: StateManagement) -> Self {
        self.state_management = style;
        self
    }

    #[must_use]
    pub fn model_style(mut self, style: ModelStyle) -> Self {
        self.model_style = style;
        self
    }

    #[must_use]
    pub fn wire_codec(mut self, enabled: bool) -> Self {
        self.wire_codec = enabled;
        self
    }

    pub fn name(&self) -> &Identifier {
        &self.base
    }

    /// Entity names the feature renders, its own first.
    pub fn entity_names(&self) -> Vec<String> {
        std::iter::once(&self.entity)
            .chain(&self.extra_entities)
            .map(EntityTemplate::class_name)
            .collect()
    }

    fn entity_and_model(&self, entity: &EntityTemplate) -> Result<FileSet, DomainError> {
        let model = ModelTemplate::new(
            entity.base(),
            entity.fields().to_vec(),
            self.model_style,
            self.wire_codec,
        )?
        .linked_to(EntityLink {
            class: entity.class_name(),
            path: entity.path(),
        });
        Ok(entity.generate().merged(model.generate()))
    }

    /// Feature-relative source files.
    ///
    /// # Errors
    ///
    /// Only when a model cannot be built from its entity's fields, which
    /// the entity's own checks already rule out.
    pub fn generate(&self) -> Result<FileSet, DomainError> {
        tracing::debug!(
            feature = %self.base,
            repository = self.include_repository,
            use_cases = self.include_use_cases,
            state = %self.state_management,
            "rendering feature"
        );
        let s = self.base.snake();
        let mut files = self.entity_and_model(&self.entity)?;
        for extra in &self.extra_entities {
            files.merge(self.entity_and_model(extra)?);
        }

        let repository = RepositoryTemplate::new(
            &self.base,
            None,
            DEFAULT_METHODS
                .iter()
                .copied()
                .map(RepositoryMethod::Catalog)
                .collect(),
            self.sources,
        );
        if self.include_repository {
            files.merge(repository.generate());
        } else if self.include_use_cases {
            files.merge(repository.generate_interface());
        }

        if self.include_use_cases {
            files.merge(usecase::generate(&self.base));
        }

        let backend = NotifierBackend::select(self.include_repository, self.include_use_cases);
        files.insert(paths::state(s), render_state(&self.base));
        files.insert(
            paths::notifier(s, self.state_management),
            render_notifier(&self.base, self.state_management, backend),
        );

        files.merge(PresentationTemplate::new(&self.base, self.entity.fields()).generate());
        Ok(files)
    }

    /// Feature-relative test files.
    pub fn generate_tests(&self) -> FileSet {
        test_scaffold::generate(&self.base, self.state_management, self.include_repository)
    }

    /// Package-relative path of the list page, for routing.
    pub fn list_page_path(&self) -> String {
        paths::list_page(self.base.snake())
    }
}
