//! Implementation of the `strata model` command.

use tracing::instrument;

use strata_core::domain::GenerationRequest;

use crate::{
    cli::{GlobalArgs, ModelArgs},
    commands::generate,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Generate one data model into the feature at `--output`.
#[instrument(skip_all, fields(model = %args.name))]
pub fn execute(
    args: ModelArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let request = build_request(&args, &config);
    generate::run(&request, &args.write, &global, &output)?;
    Ok(())
}

fn build_request(args: &ModelArgs, config: &AppConfig) -> GenerationRequest {
    GenerationRequest::model(args.name.trim())
        .with_fields(&args.fields.fields)
        .value_type(args.style.use_value_type(config.defaults.use_value_types))
        .wire_codec(!args.style.no_codec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn model_args(argv: &[&str]) -> ModelArgs {
        let cli = Cli::parse_from(["strata", "model"].iter().chain(argv));
        match cli.command {
            Commands::Model(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn plain_class_with_codec_by_default() {
        let request = build_request(&model_args(&["user"]), &AppConfig::default());
        assert!(!request.options.use_value_type);
        assert!(request.options.include_wire_codec);
    }

    #[test]
    fn style_flags() {
        let args = model_args(&["user", "--field", "name:String", "--value-type", "--no-codec"]);
        let request = build_request(&args, &AppConfig::default());
        assert_eq!(request.fields, ["name:String"]);
        assert!(request.options.use_value_type);
        assert!(!request.options.include_wire_codec);
    }
}
