//! Implementation of the `strata entity` command.

use tracing::instrument;

use strata_core::domain::GenerationRequest;

use crate::{
    cli::{EntityArgs, GlobalArgs},
    commands::generate,
    error::CliResult,
    output::OutputManager,
};

/// Generate one immutable domain entity into the feature at `--output`.
#[instrument(skip_all, fields(entity = %args.name))]
pub fn execute(args: EntityArgs, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let request = GenerationRequest::entity(args.name.trim()).with_fields(&args.fields.fields);
    generate::run(&request, &args.write, &global, &output)?;
    Ok(())
}
