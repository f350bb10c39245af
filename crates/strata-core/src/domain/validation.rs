use crate::domain::{
    error::DomainError,
    request::GenerationRequest,
    value_objects::TargetKind,
};

/// Centralized request validation.
///
/// Checks that only depend on the request's shape live here. Parsing of
/// names, field specs and method names happens when the request is
/// resolved, and reports through the same error type.
pub struct DomainValidator;

impl DomainValidator {
    /// Reject parameters that do not apply to the request's kind.
    pub fn validate_request(request: &GenerationRequest) -> Result<(), DomainError> {
        let kind = request.kind;
        let misplaced = |what: &str, allowed: &str| {
            DomainError::InvalidRequest(format!("{what} cannot be used with a {kind} target ({allowed})"))
        };

        if !request.methods.is_empty() && kind != TargetKind::Repository {
            return Err(misplaced("methods", "repository targets only"));
        }
        if request.entity.is_some() && kind != TargetKind::Repository {
            return Err(misplaced("an entity name", "repository targets only"));
        }
        if !request.entities.is_empty() && kind != TargetKind::Feature {
            return Err(misplaced("extra entities", "feature targets only"));
        }
        if !request.features.is_empty() && kind != TargetKind::Project {
            return Err(misplaced("features", "project targets only"));
        }
        if !request.fields.is_empty()
            && matches!(kind, TargetKind::Repository | TargetKind::Project)
        {
            return Err(misplaced("fields", "entity, model and feature targets only"));
        }
        if kind == TargetKind::Repository
            && !request.options.include_remote
            && !request.options.include_local
        {
            tracing::debug!("repository requested without data sources; methods will be stubs");
        }

        Self::validate_organization(&request.options.organization)
    }

    /// Reverse-domain organization identifier, e.g. `com.example`.
    ///
    /// At least two dot-separated segments; each starts with a lowercase
    /// letter and continues with lowercase letters, digits or `_`.
    pub fn validate_organization(organization: &str) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidOrganization {
            organization: organization.to_string(),
            reason: reason.to_string(),
        };

        let segments: Vec<&str> = organization.split('.').collect();
        if segments.len() < 2 {
            return Err(invalid("expected at least two dot-separated segments"));
        }
        for segment in segments {
            let mut chars = segment.chars();
            match chars.next() {
                None => return Err(invalid("empty segment")),
                Some(c) if !c.is_ascii_lowercase() => {
                    return Err(invalid("segments must start with a lowercase letter"));
                }
                Some(_) => {}
            }
            if chars.any(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')) {
                return Err(invalid(
                    "segments may only contain lowercase letters, digits and '_'",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn organization_rules() {
        assert!(DomainValidator::validate_organization("com.example").is_ok());
        assert!(DomainValidator::validate_organization("io.acme.apps_2").is_ok());
        for bad in ["example", "com..x", "Com.example", "com.1x", "com.ex-ample", ""] {
            assert!(
                matches!(
                    DomainValidator::validate_organization(bad),
                    Err(DomainError::InvalidOrganization { .. })
                ),
                "accepted: {bad}"
            );
        }
    }

    #[test]
    fn methods_only_on_repositories() {
        let req = GenerationRequest::feature("task").with_methods(["getAll"]);
        assert!(matches!(
            DomainValidator::validate_request(&req),
            Err(DomainError::InvalidRequest(_))
        ));
        let req = GenerationRequest::repository("Order").with_methods(["getAll"]);
        assert!(DomainValidator::validate_request(&req).is_ok());
    }

    #[test]
    fn fields_rejected_on_projects() {
        let req = GenerationRequest::project("app").with_field("a:int");
        assert!(DomainValidator::validate_request(&req).is_err());
    }

    #[test]
    fn bad_organization_fails_request() {
        let req = GenerationRequest::project("app").organization("nodots");
        assert!(matches!(
            DomainValidator::validate_request(&req),
            Err(DomainError::InvalidOrganization { .. })
        ));
    }
}
