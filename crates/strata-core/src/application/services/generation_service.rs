//! Generation Service - request in, files out.
//!
//! Resolves a [`GenerationRequest`] into templates and renders them. Every
//! name, field spec and method name is parsed before the first template
//! runs, so an invalid request never yields partial output.

use tracing::{info, instrument};

use crate::domain::templates::repository::DataSources;
use crate::domain::{
    DomainError, DomainValidator, EntityTemplate, FeatureTemplate, FieldSpec, FileSet, Identifier,
    ModelStyle, ModelTemplate, ProjectTemplate, RepositoryTemplate, TargetKind, resolve_methods,
};
use crate::domain::{GenerationOptions, GenerationRequest};

/// Stateless entry point of the generation engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerationService;

impl GenerationService {
    pub fn new() -> Self {
        Self
    }

    /// Render every file for `request`.
    ///
    /// Entity, model and repository files are relative to a feature
    /// directory. Feature files are relative to the project root, placed
    /// by the requested architecture. Project files are relative to the
    /// new project directory.
    ///
    /// # Errors
    ///
    /// `InvalidName`, `MalformedFieldSpec`, `DuplicateField`,
    /// `InvalidOrganization` or `InvalidRequest`; always before any
    /// template is rendered.
    #[instrument(skip_all, fields(kind = %request.kind, name = %request.name))]
    pub fn generate(&self, request: &GenerationRequest) -> Result<FileSet, DomainError> {
        DomainValidator::validate_request(request)?;
        let name = Identifier::parse(request.name.trim())?;
        let options = &request.options;

        let files = match request.kind {
            TargetKind::Entity => {
                let fields = parse_fields(request, &name.class_name("Entity"))?;
                EntityTemplate::new(&name, fields)?.generate()
            }
            TargetKind::Model => {
                let fields = parse_fields(request, &name.class_name("Model"))?;
                ModelTemplate::new(
                    &name,
                    fields,
                    ModelStyle::from_value_type_flag(options.use_value_type),
                    options.include_wire_codec,
                )?
                .generate()
            }
            TargetKind::Repository => {
                let methods = resolve_methods(&request.methods)?;
                let entity = request
                    .entity
                    .as_deref()
                    .map(|e| Identifier::parse(e.trim()))
                    .transpose()?;
                RepositoryTemplate::new(
                    &name,
                    entity.as_ref(),
                    methods,
                    DataSources::new(options.include_remote, options.include_local),
                )
                .generate()
            }
            TargetKind::Feature => {
                let feature = feature_template(&name, options)?
                    .with_fields(parse_fields(request, &name.class_name("Entity"))?)?
                    .with_entities(&parse_names(&request.entities)?)?;
                let snake = feature.name().snake();
                let mut files = feature
                    .generate()?
                    .prefixed(&options.architecture.feature_base(snake))?;
                if options.include_tests {
                    files.merge(
                        feature
                            .generate_tests()
                            .prefixed(&options.architecture.test_base(snake))?,
                    );
                }
                files
            }
            TargetKind::Project => {
                let mut project = ProjectTemplate::new(&name)
                    .organization(&options.organization)?
                    .architecture(options.architecture)
                    .state_management(options.state_management)
                    .tests(options.include_tests);
                if let Some(description) = &options.description {
                    project = project.description(description.clone());
                }
                for feature in parse_names(&request.features)? {
                    project = project.with_feature(feature_template(&feature, options)?);
                }
                project.generate()?
            }
        };

        files.validate()?;
        info!(
            files = files.len(),
            bytes = files.total_bytes(),
            "generation complete"
        );
        Ok(files)
    }
}

fn parse_fields(request: &GenerationRequest, owner: &str) -> Result<Vec<FieldSpec>, DomainError> {
    FieldSpec::parse_all(&request.fields, owner)
}

fn parse_names(names: &[String]) -> Result<Vec<Identifier>, DomainError> {
    names.iter().map(|n| Identifier::parse(n.trim())).collect()
}

fn feature_template(
    name: &Identifier,
    options: &GenerationOptions,
) -> Result<FeatureTemplate, DomainError> {
    Ok(FeatureTemplate::new(name)?
        .repository(options.include_repository)
        .use_cases(options.include_use_cases)
        .data_sources(DataSources::new(options.include_remote, options.include_local))
        .state_management(options.state_management)
        .model_style(ModelStyle::from_value_type_flag(options.use_value_type))
        .wire_codec(options.include_wire_codec))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ArchitectureStyle;

    fn generate(request: GenerationRequest) -> Result<FileSet, DomainError> {
        GenerationService::new().generate(&request)
    }

    #[test]
    fn entity_is_feature_relative() {
        let files = generate(GenerationRequest::entity("Product").with_field("price:double")).unwrap();
        let paths: Vec<_> = files.paths().collect();
        assert_eq!(paths, ["domain/entities/product_entity.dart"]);
        let source = files.get("domain/entities/product_entity.dart").unwrap();
        assert!(source.contains("final double price;"));
        assert!(source.contains("final String id;"));
    }

    #[test]
    fn malformed_field_fails_before_output() {
        let err = generate(GenerationRequest::model("User").with_field("badspec")).unwrap_err();
        assert!(matches!(err, DomainError::MalformedFieldSpec { .. }));
    }

    #[test]
    fn duplicate_field_is_rejected() {
        let err = generate(
            GenerationRequest::model("User").with_fields(["email:String", "email:String"]),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateField { .. }));
    }

    #[test]
    fn traversal_names_are_rejected() {
        for name in ["", "../evil", "a/b", "class"] {
            let err = generate(GenerationRequest::feature(name)).unwrap_err();
            assert!(matches!(err, DomainError::InvalidName { .. }), "{name}");
        }
    }

    #[test]
    fn repository_without_methods_gets_defaults() {
        let files = generate(GenerationRequest::repository("Order")).unwrap();
        let interface = files.get("domain/repositories/order_repository.dart").unwrap();
        for method in ["getAll(", "getById(", "create(", "update(", "delete("] {
            assert!(interface.contains(method), "missing {method}");
        }
    }

    #[test]
    fn repository_serves_named_entity() {
        let files = generate(
            GenerationRequest::repository("OrderRepository")
                .with_entity_name("Purchase")
                .with_methods(["getById"]),
        )
        .unwrap();
        let interface = files.get("domain/repositories/order_repository.dart").unwrap();
        assert!(interface.contains("Future<PurchaseEntity?> getById(String id);"));
    }

    #[test]
    fn feature_is_placed_by_architecture() {
        let clean = generate(GenerationRequest::feature("task").tests_enabled(true)).unwrap();
        assert!(clean.contains("lib/features/task/domain/entities/task_entity.dart"));
        assert!(clean.contains("test/features/task/presentation/state/task_notifier_test.dart"));

        let layered = generate(
            GenerationRequest::feature("task").architecture(ArchitectureStyle::Layered),
        )
        .unwrap();
        assert!(layered.contains("lib/domain/entities/task_entity.dart"));
    }

    #[test]
    fn project_includes_features() {
        let files = generate(
            GenerationRequest::project("shop")
                .with_features(["product", "cart"])
                .organization("io.acme"),
        )
        .unwrap();
        assert!(files.contains("pubspec.yaml"));
        assert!(files.contains("lib/features/product/data/models/product_model.dart"));
        assert!(files.contains("lib/features/cart/presentation/pages/cart_list_page.dart"));
        let config = files.get("lib/core/app_config.dart").unwrap();
        assert!(config.contains("'io.acme.shop'"));
    }

    #[test]
    fn project_rejects_bad_organization() {
        let err = generate(GenerationRequest::project("shop").organization("acme")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidOrganization { .. }));
    }

    #[test]
    fn methods_only_apply_to_repositories() {
        let err = generate(GenerationRequest::feature("task").with_methods(["getAll"])).unwrap_err();
        assert!(matches!(err, DomainError::InvalidRequest(_)));
    }
}
