//! Field specifications and their Dart projections.
//!
//! A [`FieldSpec`] is parsed once from the `name:Type` mini syntax and then
//! rendered into several code shapes. Every shape is derived from the same
//! value so a model's constructor, declarations, codec and equality list
//! always agree on names, order and nullability.
//!
//! ## Syntax
//!
//! ```text
//! title:String          required
//! note:String?          nullable
//! count:int=0           defaulted
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::naming::Identifier;
use crate::domain::templates::dart_string;

/// One generated data field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    name: Identifier,
    ty: String,
    nullable: bool,
    default_value: Option<String>,
    wire_key: Option<String>,
    doc: Option<String>,
}

impl FieldSpec {
    /// A required, non-nullable field.
    pub fn new(name: Identifier, ty: impl Into<String>) -> Self {
        Self {
            name,
            ty: ty.into(),
            nullable: false,
            default_value: None,
            wire_key: None,
            doc: None,
        }
    }

    /// Parse the `name:Type[?][=default]` mini syntax.
    ///
    /// # Errors
    ///
    /// - `MalformedFieldSpec` when the separator is missing, either half is
    ///   empty, or the type contains characters no Dart type can contain
    /// - `InvalidName` when the field name is not a usable identifier
    pub fn parse(spec: &str) -> Result<Self, DomainError> {
        let malformed = |reason: &str| DomainError::MalformedFieldSpec {
            spec: spec.to_string(),
            reason: reason.to_string(),
        };

        let (name, rest) = spec
            .split_once(':')
            .ok_or_else(|| malformed("missing ':' separator between name and type"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(malformed("field name is empty"));
        }

        let (ty, default_value) = match rest.split_once('=') {
            Some((ty, default)) => {
                let default = default.trim();
                if default.is_empty() {
                    return Err(malformed("default value after '=' is empty"));
                }
                (ty.trim(), Some(default.to_string()))
            }
            None => (rest.trim(), None),
        };

        let (ty, nullable) = match ty.strip_suffix('?') {
            Some(base) => (base.trim_end(), true),
            None => (ty, false),
        };
        if ty.is_empty() {
            return Err(malformed("field type is empty"));
        }
        if let Some(bad) = ty
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || "_<>,? ".contains(*c)))
        {
            return Err(malformed(&format!("type contains '{bad}'")));
        }

        Ok(Self {
            name: Identifier::parse(name)?,
            ty: ty.to_string(),
            nullable,
            default_value,
            wire_key: None,
            doc: None,
        })
    }

    /// Parse a list of specs, rejecting two fields with the same name.
    ///
    /// `owner` names the model or entity in the duplicate error.
    pub fn parse_all<S: AsRef<str>>(specs: &[S], owner: &str) -> Result<Vec<Self>, DomainError> {
        let fields = specs
            .iter()
            .map(|s| Self::parse(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        ensure_unique(&fields, owner)?;
        Ok(fields)
    }

    // ── Builder-style setters ────────────────────────────────────────────

    #[must_use]
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_wire_key(mut self, key: impl Into<String>) -> Self {
        self.wire_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    // ── Getters ──────────────────────────────────────────────────────────

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    /// The type as written, without the nullability marker.
    pub fn base_type(&self) -> &str {
        &self.ty
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Dart variable name (camelCase).
    pub fn var_name(&self) -> String {
        self.name.camel()
    }

    /// Key used in the wire map; falls back to the variable name.
    pub fn wire_key(&self) -> String {
        self.wire_key.clone().unwrap_or_else(|| self.var_name())
    }

    /// Full Dart type, including `?` when nullable.
    pub fn dart_type(&self) -> String {
        if self.nullable {
            format!("{}?", self.ty)
        } else {
            self.ty.clone()
        }
    }

    // ── Code shapes ──────────────────────────────────────────────────────

    /// Named constructor parameter.
    ///
    /// A defaulted field is optional even when not nullable.
    pub fn constructor_param(&self) -> String {
        let var = self.var_name();
        match (&self.default_value, self.nullable) {
            (Some(default), _) => format!("this.{var} = {default},"),
            (None, true) => format!("this.{var},"),
            (None, false) => format!("required this.{var},"),
        }
    }

    /// Field declaration lines, preceded by doc and wire-key comments.
    pub fn declaration(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(3);
        if let Some(doc) = &self.doc {
            lines.extend(doc.lines().map(|l| format!("/// {l}").trim_end().to_string()));
        }
        if let Some(key) = &self.wire_key {
            lines.push(format!("/// Wire key: `{key}`."));
        }
        lines.push(format!("final {} {};", self.dart_type(), self.var_name()));
        lines
    }

    /// Optional override parameter of `copyWith`.
    pub fn copy_with_param(&self) -> String {
        format!("{}? {},", self.ty, self.var_name())
    }

    /// `copyWith` argument forwarding the override or the current value.
    pub fn copy_with_assignment(&self) -> String {
        let var = self.var_name();
        format!("{var}: {var} ?? this.{var},")
    }

    /// Entry of an equality tuple (`props`, `Object.hash`).
    pub fn equality_entry(&self) -> String {
        self.var_name()
    }

    /// `name: $name` entry of a `toString` body.
    pub fn to_string_entry(&self) -> String {
        let var = self.var_name();
        format!("{var}: ${var}")
    }

    /// Expression decoding this field out of the wire map named `map`.
    pub fn decode_expr(&self, map: &str) -> String {
        let raw = format!("{map}[{}]", dart_string(&self.wire_key()));
        let optional = self.nullable || self.default_value.is_some();
        let ty = self.ty.as_str();

        let expr = if ty == "DateTime" {
            if optional {
                format!("{raw} == null ? null : DateTime.parse({raw} as String)")
            } else {
                format!("DateTime.parse({raw} as String)")
            }
        } else if ty == "double" {
            if optional {
                format!("({raw} as num?)?.toDouble()")
            } else {
                format!("({raw} as num).toDouble()")
            }
        } else if let Some(inner) = ty.strip_prefix("List<").and_then(|s| s.strip_suffix('>')) {
            if optional {
                format!("({raw} as List<dynamic>?)?.cast<{inner}>()")
            } else {
                format!("({raw} as List<dynamic>).cast<{inner}>()")
            }
        } else if ty.starts_with("Map<") {
            if optional {
                format!("{raw} == null ? null : {ty}.from({raw} as Map)")
            } else {
                format!("{ty}.from({raw} as Map)")
            }
        } else if optional {
            format!("{raw} as {ty}?")
        } else {
            format!("{raw} as {ty}")
        };

        match &self.default_value {
            Some(default) if expr.contains(" ? ") => format!("({expr}) ?? {default}"),
            Some(default) => format!("{expr} ?? {default}"),
            None => expr,
        }
    }

    /// Expression encoding this field into its wire value.
    pub fn encode_expr(&self) -> String {
        let var = self.var_name();
        match (self.ty.as_str(), self.nullable) {
            ("DateTime", true) => format!("{var}?.toIso8601String()"),
            ("DateTime", false) => format!("{var}.toIso8601String()"),
            _ => var,
        }
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.dart_type())?;
        if let Some(default) = &self.default_value {
            write!(f, "={default}")?;
        }
        Ok(())
    }
}

/// Reject field lists that would render two identical constructor parameters.
pub fn ensure_unique(fields: &[FieldSpec], owner: &str) -> Result<(), DomainError> {
    let mut seen = HashSet::with_capacity(fields.len());
    for field in fields {
        let var = field.var_name();
        if !seen.insert(var.clone()) {
            return Err(DomainError::DuplicateField {
                field: var,
                owner: owner.to_string(),
            });
        }
    }
    Ok(())
}

/// Fields an entity carries when the caller supplies none.
pub fn default_entity_fields() -> Vec<FieldSpec> {
    vec![
        id_field(),
        FieldSpec::new(Identifier::trusted("name"), "String"),
        FieldSpec::new(Identifier::trusted("createdAt"), "DateTime"),
        FieldSpec::new(Identifier::trusted("updatedAt"), "DateTime").nullable(true),
    ]
}

/// Prepend `id:String` unless a field named `id` is already present.
///
/// Local stores and notifiers key entities by `id` in a `Map<String, _>`,
/// so a user-supplied `id` must be a non-nullable `String`.
///
/// # Errors
///
/// `InvalidRequest` when the given `id` has any other type.
pub fn with_id_field(mut fields: Vec<FieldSpec>) -> Result<Vec<FieldSpec>, DomainError> {
    match fields.iter().find(|f| f.var_name() == "id") {
        Some(id) if id.dart_type() != "String" => {
            return Err(DomainError::InvalidRequest(format!(
                "field 'id' must be String, got '{}'",
                id.dart_type()
            )));
        }
        Some(_) => {}
        None => fields.insert(0, id_field()),
    }
    Ok(fields)
}

fn id_field() -> FieldSpec {
    FieldSpec::new(Identifier::trusted("id"), "String")
}
