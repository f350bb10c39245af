//! Implementation of the `strata repository` command.

use tracing::instrument;

use strata_core::domain::GenerationRequest;

use crate::{
    cli::{GlobalArgs, RepositoryArgs},
    commands::generate,
    error::CliResult,
    output::OutputManager,
};

/// Generate a repository contract, its implementation and data sources
/// into the feature at `--output`.
#[instrument(skip_all, fields(repository = %args.name))]
pub fn execute(args: RepositoryArgs, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let request = build_request(&args);
    generate::run(&request, &args.write, &global, &output)?;
    Ok(())
}

fn build_request(args: &RepositoryArgs) -> GenerationRequest {
    let mut request = GenerationRequest::repository(args.name.trim())
        .with_methods(&args.methods)
        .data_sources(!args.sources.no_remote, !args.sources.no_local);
    if let Some(entity) = &args.entity {
        request = request.with_entity_name(entity.trim());
    }
    request
}
