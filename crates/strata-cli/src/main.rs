//! `strata`: generate layered Flutter code from the command line.
//!
//! `main` parses flags, installs logging, loads the layered configuration
//! and hands off to one handler in [`commands`]. Errors come back as
//! [`CliError`] and leave through [`handle_error`].
//!
//! Exit codes: 0 success, 1 internal failure, 2 bad input or a refused
//! overwrite, 3 unknown key, 4 configuration problem.

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // A missing .env is normal.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version land here too; they print to stdout and succeed.
        Err(e) if !e.use_stderr() => {
            print!("{}", e.render().ansi());
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}", e.render().ansi());
            return ExitCode::from(2);
        }
    };

    let _log_guard = match init_logging(&cli.global) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("strata: cannot set up logging: {e:#}");
            return ExitCode::from(1);
        }
    };
    debug!(command = ?cli.command, "parsed arguments");

    let verbose = cli.global.verbose > 0;
    let color = !cli.global.no_color && std::io::stderr().is_terminal();

    // `init` and `config set` may name a file they are about to create.
    let must_exist = !cli.command.writes_config();
    let config = match AppConfig::load(cli.global.config.as_ref(), must_exist) {
        Ok(config) => config,
        Err(e) => {
            let err = CliError::ConfigError {
                message: format!("{e:#}"),
                source: None,
            };
            return handle_error(err, verbose, color);
        }
    };

    let output = OutputManager::new(&cli.global, &config);
    match run(cli, config, output) {
        Ok(()) => {
            info!("done");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose, color),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::New(cmd) => commands::new::execute(cmd, cli.global, config, output),
        Commands::Feature(cmd) => commands::feature::execute(cmd, cli.global, config, output),
        Commands::Entity(cmd) => commands::entity::execute(cmd, cli.global, output),
        Commands::Model(cmd) => commands::model::execute(cmd, cli.global, config, output),
        Commands::Repository(cmd) => commands::repository::execute(cmd, cli.global, output),
        Commands::List(cmd) => commands::list::execute(cmd, output),
        Commands::Init(cmd) => commands::init::execute(cmd, cli.global, output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
        Commands::Config(cmd) => commands::config::execute(cmd, cli.global, config, output),
    }
}

/// Print `err` on stderr and pick the exit code.
fn handle_error(err: CliError, verbose: bool, color: bool) -> ExitCode {
    err.log();
    eprint!("{}", err.render(verbose, color));
    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_version_matches_cargo() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn cli_has_author() {
        let cmd = Cli::command();
        assert!(cmd.get_author().is_some());
    }

    #[test]
    fn every_generator_is_a_subcommand() {
        let cmd = Cli::command();
        for name in ["new", "feature", "entity", "model", "repository", "list", "config"] {
            assert!(cmd.find_subcommand(name).is_some(), "missing {name}");
        }
    }
}
