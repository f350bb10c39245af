//! Name casing and validated identifiers.
//!
//! Every generator derives its class names, file names and variable names
//! from a single user-supplied name. The four casing functions here are the
//! only place that knowledge lives, so a `Task` entity, a `task_entity.dart`
//! file and a `task` local variable always agree.
//!
//! ## Casing Rules
//!
//! | Function | Input | Output |
//! |----------|-------|--------|
//! | [`to_snake_case`] | "UserProfile" | "user_profile" |
//! | [`to_pascal_case`] | "user_profile" | "UserProfile" |
//! | [`to_camel_case`] | "user_profile" | "userProfile" |
//! | [`to_sentence_case`] | "GetUserProfile" | "Get User Profile" |
//!
//! All four are total: empty input yields empty output.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Insert `_` before every uppercase letter not at position 0, then lowercase.
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Split on `_` and upper-case the first letter of every segment.
pub fn to_pascal_case(s: &str) -> String {
    s.split('_').map(capitalize).collect()
}

/// Like [`to_pascal_case`], but the first segment is lower-cased entirely.
pub fn to_camel_case(s: &str) -> String {
    let mut segments = s.split('_');
    let mut out = segments.next().map(str::to_lowercase).unwrap_or_default();
    for segment in segments {
        out.push_str(&capitalize(segment));
    }
    out
}

/// Insert a space before each interior uppercase letter. Case is preserved.
pub fn to_sentence_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(segment.len());
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Naive English plural used for page titles and route names.
pub fn pluralize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        format!("{word}es")
    } else if lower.ends_with('y')
        && !lower.ends_with("ay")
        && !lower.ends_with("ey")
        && !lower.ends_with("oy")
        && !lower.ends_with("uy")
    {
        format!("{}ies", &word[..word.len() - 1])
    } else {
        format!("{word}s")
    }
}

/// Dart reserved words that cannot be used as variable names.
const RESERVED_WORDS: &[&str] = &[
    "assert", "break", "case", "catch", "class", "const", "continue", "default", "do", "else",
    "enum", "extends", "false", "final", "finally", "for", "if", "in", "is", "new", "null",
    "rethrow", "return", "super", "switch", "this", "throw", "true", "try", "var", "void",
    "while", "with",
];

/// Check that `raw` is safe to use both as a code identifier and as a path
/// segment.
///
/// Rejects empty names, path separators, `..`, non-identifier characters,
/// a leading digit, names whose PascalCase form is empty, and names whose
/// camelCase form is a Dart reserved word.
pub fn validate_identifier(raw: &str) -> Result<(), DomainError> {
    if raw.is_empty() {
        return Err(DomainError::invalid_name(raw, "name cannot be empty"));
    }
    if raw.contains('/') || raw.contains('\\') {
        return Err(DomainError::invalid_name(
            raw,
            "name cannot contain path separators",
        ));
    }
    if raw.contains("..") {
        return Err(DomainError::invalid_name(
            raw,
            "name cannot ascend directories ('..')",
        ));
    }
    if let Some(bad) = raw.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '_') {
        return Err(DomainError::invalid_name(
            raw,
            format!("character '{bad}' is not allowed in identifiers"),
        ));
    }
    if raw.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(DomainError::invalid_name(raw, "name cannot start with a digit"));
    }

    let snake = to_snake_case(raw);
    if to_pascal_case(&snake).is_empty() {
        return Err(DomainError::invalid_name(
            raw,
            "name has no letters once cased",
        ));
    }
    let camel = to_camel_case(&snake);
    if RESERVED_WORDS.contains(&camel.as_str()) {
        return Err(DomainError::invalid_name(
            raw,
            format!("'{camel}' is a reserved word"),
        ));
    }

    Ok(())
}

/// A validated user-supplied name with all of its derived casings.
///
/// Every casing is derived from the snake_case form, so `UserProfile`,
/// `userProfile` and `user_profile` all produce the same identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier {
    raw: String,
    snake: String,
}

impl Identifier {
    /// Validate and wrap a name.
    ///
    /// # Errors
    ///
    /// `InvalidName` when [`validate_identifier`] rejects the input.
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        validate_identifier(&raw)?;
        let snake = to_snake_case(&raw);
        Ok(Self { raw, snake })
    }

    /// Wrap a built-in literal that is known to be valid.
    pub(crate) fn trusted(raw: &'static str) -> Self {
        Self {
            raw: raw.to_string(),
            snake: to_snake_case(raw),
        }
    }

    /// The name exactly as supplied.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn snake(&self) -> &str {
        &self.snake
    }

    pub fn pascal(&self) -> String {
        to_pascal_case(&self.snake)
    }

    pub fn camel(&self) -> String {
        to_camel_case(&self.snake)
    }

    /// Human-readable form, e.g. "User Profile".
    pub fn sentence(&self) -> String {
        to_sentence_case(&self.pascal())
    }

    /// PascalCase name with `suffix` appended unless already present.
    pub fn class_name(&self, suffix: &str) -> String {
        let pascal = self.pascal();
        if pascal.ends_with(suffix) {
            pascal
        } else {
            format!("{pascal}{suffix}")
        }
    }

    /// The same name with a trailing `suffix` removed (`OrderRepository` -> `Order`).
    ///
    /// Returns `self` unchanged when stripping would leave nothing.
    pub fn without_suffix(&self, suffix: &str) -> Identifier {
        let pascal = self.pascal();
        match pascal.strip_suffix(suffix) {
            Some(stem) if !stem.is_empty() => Identifier {
                raw: stem.to_string(),
                snake: to_snake_case(stem),
            },
            _ => self.clone(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl TryFrom<String> for Identifier {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.raw
    }
}
