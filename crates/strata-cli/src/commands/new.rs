//! Implementation of the `strata new` command.
//!
//! Responsibility: translate CLI arguments into a project
//! `GenerationRequest`, hand it to the shared write flow, and print next
//! steps. No business logic lives here.

use tracing::instrument;

use strata_core::domain::GenerationRequest;

use crate::{
    cli::{GlobalArgs, NewArgs},
    commands::generate,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `strata new` command.
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let request = build_request(&args, &config);

    let Some(report) = generate::run(&request, &args.write, &global, &output)? else {
        return Ok(());
    };

    if !global.quiet && !output.is_json() {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", report.root.display()))?;
        output.print("  flutter pub get")?;
        output.print("  flutter run")?;
    }

    Ok(())
}

/// Flags win over config defaults.
fn build_request(args: &NewArgs, config: &AppConfig) -> GenerationRequest {
    let defaults = &config.defaults;
    let mut request = GenerationRequest::project(args.name.trim())
        .organization(
            args.organization
                .clone()
                .unwrap_or_else(|| defaults.organization.clone()),
        )
        .architecture(args.architecture.map_or(defaults.architecture, Into::into))
        .state_management(args.state.map_or(defaults.state_management, Into::into))
        .tests_enabled(args.tests.include_tests(defaults.include_tests))
        .value_type(defaults.use_value_types)
        .with_features(&args.features);
    request.options.description = args.description.clone();
    request
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use strata_core::domain::{ArchitectureStyle, StateManagement, TargetKind};

    fn new_args(argv: &[&str]) -> NewArgs {
        let cli = Cli::parse_from(["strata", "new"].iter().chain(argv));
        match cli.command {
            Commands::New(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn config_defaults_fill_missing_flags() {
        let mut config = AppConfig::default();
        config.defaults.organization = "com.acme".into();
        config.defaults.state_management = StateManagement::Bloc;
        config.defaults.include_tests = true;

        let request = build_request(&new_args(&["shop"]), &config);
        assert_eq!(request.kind, TargetKind::Project);
        assert_eq!(request.options.organization, "com.acme");
        assert_eq!(request.options.state_management, StateManagement::Bloc);
        assert!(request.options.include_tests);
    }

    #[test]
    fn flags_beat_config() {
        let mut config = AppConfig::default();
        config.defaults.include_tests = true;

        let args = new_args(&[
            "shop",
            "--org",
            "io.shop",
            "--arch",
            "layered",
            "--state",
            "provider",
            "--no-tests",
            "-F",
            "product",
            "-d",
            "A small shop",
        ]);
        let request = build_request(&args, &config);
        assert_eq!(request.options.organization, "io.shop");
        assert_eq!(request.options.architecture, ArchitectureStyle::Layered);
        assert_eq!(request.options.state_management, StateManagement::Provider);
        assert!(!request.options.include_tests);
        assert_eq!(request.features, ["product"]);
        assert_eq!(request.options.description.as_deref(), Some("A small shop"));
    }

    #[test]
    fn name_is_trimmed() {
        let request = build_request(&new_args(&[" shop "]), &AppConfig::default());
        assert_eq!(request.name, "shop");
    }
}
