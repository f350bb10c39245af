//! Implementation of the `strata feature` command.

use tracing::instrument;

use strata_core::domain::GenerationRequest;

use crate::{
    cli::{FeatureArgs, GlobalArgs},
    commands::generate,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Generate one feature slice into the project at `--output`.
#[instrument(skip_all, fields(feature = %args.name))]
pub fn execute(
    args: FeatureArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    if !global.quiet && !output.is_json() && !args.write.output_dir().join("pubspec.yaml").is_file()
    {
        output.warning("No pubspec.yaml here; the feature expects to live in a Flutter project")?;
    }

    let request = build_request(&args, &config);
    generate::run(&request, &args.write, &global, &output)?;
    Ok(())
}

fn build_request(args: &FeatureArgs, config: &AppConfig) -> GenerationRequest {
    let defaults = &config.defaults;
    GenerationRequest::feature(args.name.trim())
        .with_fields(&args.fields.fields)
        .with_entities(&args.entities)
        .repository_enabled(!args.no_repository)
        .use_cases_enabled(!args.no_usecases)
        .data_sources(!args.sources.no_remote, !args.sources.no_local)
        .value_type(args.model.use_value_type(defaults.use_value_types))
        .wire_codec(!args.model.no_codec)
        .architecture(args.architecture.map_or(defaults.architecture, Into::into))
        .state_management(args.state.map_or(defaults.state_management, Into::into))
        .tests_enabled(args.tests.include_tests(defaults.include_tests))
}
