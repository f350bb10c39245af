//! `strata init`: create a default configuration file.

use std::path::{Path, PathBuf};

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::{AppConfig, LOCAL_CONFIG_FILE},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Create a default strata configuration file.
pub fn execute(args: InitArgs, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    output.info("Initialising configuration...")?;

    let config_path = target_path(&args, &global);

    // Bail early if the file already exists and --force was not given.
    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    write_default(&config_path)?;

    output.success(&format!(
        "Configuration created at {}",
        config_path.display(),
    ))?;

    Ok(())
}

/// `--config` wins, then `--local`, then the user config directory.
fn target_path(args: &InitArgs, global: &GlobalArgs) -> PathBuf {
    match (&global.config, args.local) {
        (Some(path), _) => path.clone(),
        (None, true) => PathBuf::from(LOCAL_CONFIG_FILE),
        (None, false) => AppConfig::config_path(),
    }
}

fn write_default(path: &Path) -> CliResult<()> {
    let toml = toml::to_string_pretty(&AppConfig::default()).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise default config: {e}"),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn global_with(config: Option<PathBuf>) -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            config,
            output_format: OutputFormat::Plain,
            log_file: None,
        }
    }

    #[test]
    fn explicit_config_path_wins() {
        let args = InitArgs {
            local: true,
            force: false,
        };
        let path = target_path(&args, &global_with(Some(PathBuf::from("/tmp/s.toml"))));
        assert_eq!(path, PathBuf::from("/tmp/s.toml"));
        assert_eq!(
            target_path(&args, &global_with(None)),
            PathBuf::from(LOCAL_CONFIG_FILE)
        );
    }

    #[test]
    fn written_default_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/strata.toml");
        write_default(&path).unwrap();
        assert_eq!(AppConfig::from_file(&path).unwrap(), AppConfig::default());
    }
}
