//! Flags accepted by every subcommand.
//!
//! Flattened into [`super::Cli`] with `global = true`, so `strata feature
//! task -vv` and `strata -vv feature task` mean the same thing.

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum};

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Log more: -v info, -vv debug (one event per rendered file), -vvv trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Never emit ANSI colour (also set by the NO_COLOR variable)
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Read settings from FILE instead of the user and project files
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How results are printed
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,

    /// Append JSON log records to FILE
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` otherwise
    #[default]
    Auto,
    /// Coloured text
    Human,
    /// Text without escape codes
    Plain,
    /// One JSON document on stdout
    Json,
}

impl OutputFormat {
    /// Read `output.format` from the config; anything unrecognised is `Auto`.
    pub fn from_config(value: &str) -> Self {
        Self::from_str(value.trim(), true).unwrap_or_default()
    }
}
