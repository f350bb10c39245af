// ============================================================================
// domain/error.rs - GENERATION ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Every variant is raised while a request is being validated, before any
/// output exists. All errors are:
/// - Cloneable (callers may keep them alongside a report)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Malformed field spec '{spec}': {reason}")]
    MalformedFieldSpec { spec: String, reason: String },

    #[error("Duplicate field '{field}' in {owner}")]
    DuplicateField { field: String, owner: String },

    #[error("Invalid organization identifier '{organization}': {reason}")]
    InvalidOrganization {
        organization: String,
        reason: String,
    },

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Unknown {kind}: '{value}'")]
    InvalidValue { kind: &'static str, value: String },

    #[error("Invalid generation request: {0}")]
    InvalidRequest(String),

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Shorthand used by every identifier check.
    pub(crate) fn invalid_name(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidName { name, .. } => vec![
                format!("'{}' cannot be used to name generated files", name),
                "Use letters, digits and underscores only (e.g. task, user_profile, UserProfile)"
                    .into(),
                "Names must not contain '/', '\\' or '..'".into(),
            ],
            Self::MalformedFieldSpec { spec, .. } => vec![
                format!("Could not read field spec '{}'", spec),
                "Write fields as name:Type, e.g. --field title:String".into(),
                "Append '?' for nullable (note:String?) or '=value' for a default (count:int=0)"
                    .into(),
            ],
            Self::DuplicateField { field, .. } => vec![
                format!("Field '{}' was given more than once", field),
                "Remove or rename one of the duplicates".into(),
            ],
            Self::InvalidOrganization { .. } => vec![
                "Use reverse-domain notation, e.g. com.example or io.acme.apps".into(),
            ],
            Self::InvalidValue { kind, .. } => vec![
                format!("Check the spelling of the {}", kind),
                "Try: strata list to see supported values".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidName { .. }
            | Self::MalformedFieldSpec { .. }
            | Self::DuplicateField { .. }
            | Self::InvalidOrganization { .. }
            | Self::InvalidPath { .. }
            | Self::InvalidRequest(_)
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::InvalidValue { .. } => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_field_suggestions_show_syntax() {
        let err = DomainError::MalformedFieldSpec {
            spec: "badspec".into(),
            reason: "missing ':' separator".into(),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("name:Type")));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn invalid_name_message_includes_reason() {
        let err = DomainError::invalid_name("../x", "path traversal");
        assert_eq!(err.to_string(), "Invalid name '../x': path traversal");
    }

    #[test]
    fn unknown_value_is_not_found() {
        let err = DomainError::InvalidValue {
            kind: "state management style",
            value: "mobx".into(),
        };
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }
}
