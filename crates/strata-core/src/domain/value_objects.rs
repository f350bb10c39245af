//! Domain value objects: TargetKind, ArchitectureStyle, StateManagement, ModelStyle.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! Each owns its string representation, its `FromStr` parser and the small
//! amount of Dart vocabulary that differs between its variants. The
//! templates ask these types for names and never match on them for text.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add its arms to `as_str`, `FromStr` and the vocabulary methods
//! 3. Add it to the type's `ALL` list so `strata list` shows it

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ── TargetKind ───────────────────────────────────────────────────────────────

/// What a single generation call produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Entity,
    Model,
    Repository,
    Feature,
    Project,
}

impl TargetKind {
    pub const ALL: &'static [TargetKind] = &[
        Self::Entity,
        Self::Model,
        Self::Repository,
        Self::Feature,
        Self::Project,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Model => "model",
            Self::Repository => "repository",
            Self::Feature => "feature",
            Self::Project => "project",
        }
    }

    /// Whether the output is rooted at a fresh project directory.
    pub const fn creates_root(self) -> bool {
        matches!(self, Self::Project)
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "entity" => Ok(Self::Entity),
            "model" => Ok(Self::Model),
            "repository" | "repo" => Ok(Self::Repository),
            "feature" => Ok(Self::Feature),
            "project" | "app" => Ok(Self::Project),
            other => Err(DomainError::InvalidValue {
                kind: "target kind",
                value: other.to_string(),
            }),
        }
    }
}

// ── ArchitectureStyle ────────────────────────────────────────────────────────

/// Where feature slices live inside a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchitectureStyle {
    /// One directory per feature: `lib/features/<name>/{data,domain,presentation}`.
    #[default]
    Clean,
    /// Shared layer directories: `lib/{data,domain,presentation}`.
    Layered,
}

impl ArchitectureStyle {
    pub const ALL: &'static [ArchitectureStyle] = &[Self::Clean, Self::Layered];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Layered => "layered",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Clean => "one self-contained directory per feature",
            Self::Layered => "shared data/domain/presentation directories",
        }
    }

    /// Project-relative directory of a feature's sources.
    pub fn feature_base(&self, feature_snake: &str) -> String {
        match self {
            Self::Clean => format!("lib/features/{feature_snake}"),
            Self::Layered => "lib".to_string(),
        }
    }

    /// Project-relative directory of a feature's tests.
    pub fn test_base(&self, feature_snake: &str) -> String {
        match self {
            Self::Clean => format!("test/features/{feature_snake}"),
            Self::Layered => "test".to_string(),
        }
    }

    /// Import path of a feature file from the package root, e.g.
    /// `features/task/presentation/pages/task_list_page.dart`.
    pub fn package_path(&self, feature_snake: &str, relative: &str) -> String {
        match self {
            Self::Clean => format!("features/{feature_snake}/{relative}"),
            Self::Layered => relative.to_string(),
        }
    }
}

impl fmt::Display for ArchitectureStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchitectureStyle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clean" | "feature" | "feature-first" => Ok(Self::Clean),
            "layered" | "layer" | "layer-first" => Ok(Self::Layered),
            other => Err(DomainError::InvalidValue {
                kind: "architecture style",
                value: other.to_string(),
            }),
        }
    }
}

// ── StateManagement ──────────────────────────────────────────────────────────

/// State-management package the generated notifier is written against.
///
/// Only the base class, the state-assignment statement and the manifest
/// dependency differ; the mutation logic is the same for every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateManagement {
    #[default]
    Riverpod,
    Bloc,
    Provider,
}

impl StateManagement {
    pub const ALL: &'static [StateManagement] = &[Self::Riverpod, Self::Bloc, Self::Provider];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Riverpod => "riverpod",
            Self::Bloc => "bloc",
            Self::Provider => "provider",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Riverpod => "StateNotifier from flutter_riverpod",
            Self::Bloc => "Cubit from flutter_bloc",
            Self::Provider => "ChangeNotifier for package:provider",
        }
    }

    /// Class-name suffix of the notifier (`TaskNotifier`, `TaskCubit`).
    pub const fn class_suffix(&self) -> &'static str {
        match self {
            Self::Riverpod => "Notifier",
            Self::Bloc => "Cubit",
            Self::Provider => "Controller",
        }
    }

    /// File-name suffix of the notifier (`task_notifier.dart`).
    pub const fn file_suffix(&self) -> &'static str {
        match self {
            Self::Riverpod => "notifier",
            Self::Bloc => "cubit",
            Self::Provider => "controller",
        }
    }

    /// `extends` clause for a notifier over `state_class`.
    pub fn base_class(&self, state_class: &str) -> String {
        match self {
            Self::Riverpod => format!("StateNotifier<{state_class}>"),
            Self::Bloc => format!("Cubit<{state_class}>"),
            Self::Provider => "ChangeNotifier".to_string(),
        }
    }

    pub const fn import(&self) -> &'static str {
        match self {
            Self::Riverpod => "package:flutter_riverpod/flutter_riverpod.dart",
            Self::Bloc => "package:flutter_bloc/flutter_bloc.dart",
            Self::Provider => "package:flutter/foundation.dart",
        }
    }

    /// `pubspec.yaml` dependency line.
    pub const fn package(&self) -> (&'static str, &'static str) {
        match self {
            Self::Riverpod => ("flutter_riverpod", "^2.5.1"),
            Self::Bloc => ("flutter_bloc", "^8.1.6"),
            Self::Provider => ("provider", "^6.1.2"),
        }
    }

    /// Statement publishing a new state value.
    pub fn assign(&self, expr: &str) -> String {
        match self {
            Self::Riverpod => format!("state = {expr};"),
            Self::Bloc => format!("emit({expr});"),
            Self::Provider => format!("_emit({expr});"),
        }
    }
}

impl fmt::Display for StateManagement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateManagement {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "riverpod" | "state_notifier" => Ok(Self::Riverpod),
            "bloc" | "cubit" => Ok(Self::Bloc),
            "provider" | "change_notifier" => Ok(Self::Provider),
            other => Err(DomainError::InvalidValue {
                kind: "state management style",
                value: other.to_string(),
            }),
        }
    }
}

// ── ModelStyle ───────────────────────────────────────────────────────────────

/// How a generated model implements equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelStyle {
    /// `Equatable` subclass with a `props` list.
    ValueType,
    /// Hand-written `==`, `hashCode` and `toString`.
    #[default]
    PlainClass,
}

impl ModelStyle {
    pub const fn from_value_type_flag(use_value_type: bool) -> Self {
        if use_value_type {
            Self::ValueType
        } else {
            Self::PlainClass
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValueType => "value-type",
            Self::PlainClass => "plain-class",
        }
    }
}

impl fmt::Display for ModelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
