//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables `STRATA__<SECTION>__<KEY>`
//! 3. `--config FILE`, or else `.strata.toml` in the current directory
//!    layered over the user config file
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use strata_core::domain::{ArchitectureStyle, DEFAULT_ORGANIZATION, StateManagement};

/// File name of the per-project configuration.
pub const LOCAL_CONFIG_FILE: &str = ".strata.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults for generation flags.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub organization: String,
    pub architecture: ArchitectureStyle,
    pub state_management: StateManagement,
    pub include_tests: bool,
    pub use_value_types: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            organization: DEFAULT_ORGANIZATION.into(),
            architecture: ArchitectureStyle::default(),
            state_management: StateManagement::default(),
            include_tests: false,
            use_value_types: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

/// Every key `config get` and `config set` understand.
pub const KEYS: &[&str] = &[
    "defaults.organization",
    "defaults.architecture",
    "defaults.state_management",
    "defaults.include_tests",
    "defaults.use_value_types",
    "output.no_color",
    "output.format",
];

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// An explicit `config_file` must exist unless `must_exist` is false;
    /// the implicit files are always optional.
    pub fn load(config_file: Option<&PathBuf>, must_exist: bool) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to encode default config")?;
        let mut builder = Config::builder().add_source(defaults);

        builder = match config_file {
            Some(path) => builder.add_source(toml_file(path, must_exist)),
            None => builder
                .add_source(toml_file(&Self::config_path(), false))
                .add_source(toml_file(Path::new(LOCAL_CONFIG_FILE), false)),
        };

        let config = builder
            .add_source(
                Environment::with_prefix("STRATA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration values")
    }

    /// Read a single TOML file over the built-in defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.strata.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "strata", "strata")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Value of a dotted key, rendered the way `config set` accepts it.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "defaults.organization" => self.defaults.organization.clone(),
            "defaults.architecture" => self.defaults.architecture.to_string(),
            "defaults.state_management" => self.defaults.state_management.to_string(),
            "defaults.include_tests" => self.defaults.include_tests.to_string(),
            "defaults.use_value_types" => self.defaults.use_value_types.to_string(),
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => self.output.format.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Update a dotted key. Returns `Ok(false)` for an unknown key and an
    /// error message for a value the key does not accept.
    pub fn set(&mut self, key: &str, value: &str) -> Result<bool, String> {
        match key {
            "defaults.organization" => self.defaults.organization = value.trim().to_string(),
            "defaults.architecture" => {
                self.defaults.architecture = value.parse().map_err(|e| format!("{e}"))?;
            }
            "defaults.state_management" => {
                self.defaults.state_management = value.parse().map_err(|e| format!("{e}"))?;
            }
            "defaults.include_tests" => self.defaults.include_tests = parse_bool(value)?,
            "defaults.use_value_types" => self.defaults.use_value_types = parse_bool(value)?,
            "output.no_color" => self.output.no_color = parse_bool(value)?,
            "output.format" => match value {
                "auto" | "human" | "plain" | "json" => self.output.format = value.to_string(),
                other => return Err(format!("'{other}' is not one of auto, human, plain, json")),
            },
            _ => return Ok(false),
        }
        Ok(true)
    }
}

fn toml_file(path: &Path, required: bool) -> File<config::FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml).required(required)
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(format!("'{other}' is not a boolean")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_organization_is_example() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.organization, "com.example");
        assert_eq!(cfg.defaults.state_management, StateManagement::Riverpod);
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strata.toml");
        std::fs::write(
            &path,
            "[defaults]\norganization = \"com.acme\"\nstate_management = \"bloc\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path), true).unwrap();
        assert_eq!(cfg.defaults.organization, "com.acme");
        assert_eq!(cfg.defaults.state_management, StateManagement::Bloc);
        assert_eq!(cfg.defaults.architecture, ArchitectureStyle::Clean);
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path), true).is_err());
        assert!(AppConfig::load(Some(&path), false).is_ok());
    }

    #[test]
    fn partial_file_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strata.toml");
        std::fs::write(&path, "[output]\nno_color = true\n").unwrap();

        let cfg = AppConfig::from_file(&path).unwrap();
        assert!(cfg.output.no_color);
        assert_eq!(cfg.defaults, Defaults::default());
    }

    #[test]
    fn every_key_round_trips() {
        let mut cfg = AppConfig::default();
        for key in KEYS {
            let value = cfg.get(key).unwrap();
            assert_eq!(cfg.set(key, &value), Ok(true), "{key}");
        }
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn set_validates_values() {
        let mut cfg = AppConfig::default();
        assert_eq!(cfg.set("defaults.architecture", "layered"), Ok(true));
        assert_eq!(cfg.defaults.architecture, ArchitectureStyle::Layered);
        assert!(cfg.set("defaults.include_tests", "maybe").is_err());
        assert!(cfg.set("output.format", "xml").is_err());
        assert_eq!(cfg.set("defaults.lang", "rust"), Ok(false));
        assert_eq!(cfg.get("defaults.lang"), None);
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
