//! `strata config`: read and write configuration values.

use std::path::{Path, PathBuf};

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config
                .get(&key)
                .ok_or(CliError::UnknownConfigKey { key: key.clone() })?;
            // The bare value, so scripts can capture it.
            println!("{value}");
        }

        ConfigCommands::Set { key, value } => {
            let path = writable_path(&global);
            set_value(&path, &key, &value)?;
            output.success(&format!("Set {key} = {value} in {}", path.display()))?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
                return Ok(());
            }
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            println!("{}", writable_path(&global).display());
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn writable_path(global: &GlobalArgs) -> PathBuf {
    global.config.clone().unwrap_or_else(AppConfig::config_path)
}

/// Update one key in the file at `path`, creating the file if needed.
///
/// Only the file's own values are rewritten; environment overrides are not
/// persisted.
fn set_value(path: &Path, key: &str, value: &str) -> CliResult<()> {
    let mut stored = if path.exists() {
        AppConfig::from_file(path).map_err(|e| CliError::ConfigError {
            message: format!("{e:#}"),
            source: None,
        })?
    } else {
        AppConfig::default()
    };

    match stored.set(key, value) {
        Ok(true) => {}
        Ok(false) => return Err(CliError::UnknownConfigKey { key: key.into() }),
        Err(reason) => {
            return Err(CliError::InvalidInput {
                message: format!("{key}: {reason}"),
                source: None,
            });
        }
    }

    let toml = toml::to_string_pretty(&stored).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }
    std::fs::write(path, toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::domain::StateManagement;

    #[test]
    fn set_creates_and_updates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strata.toml");

        set_value(&path, "defaults.state_management", "bloc").unwrap();
        set_value(&path, "defaults.organization", "com.acme").unwrap();

        let stored = AppConfig::from_file(&path).unwrap();
        assert_eq!(stored.defaults.state_management, StateManagement::Bloc);
        assert_eq!(stored.defaults.organization, "com.acme");
    }

    #[test]
    fn set_unknown_key_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strata.toml");
        assert!(matches!(
            set_value(&path, "does.not.exist", "x"),
            Err(CliError::UnknownConfigKey { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn set_bad_value_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strata.toml");
        assert!(matches!(
            set_value(&path, "defaults.include_tests", "perhaps"),
            Err(CliError::InvalidInput { .. })
        ));
    }
}
