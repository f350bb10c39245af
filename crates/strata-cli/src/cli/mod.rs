//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use strata_core::domain::{ArchitectureStyle, StateManagement};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "strata",
    bin_name = "strata",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Layered feature scaffolding for Flutter apps",
    long_about = "Strata generates Dart sources for a layered Flutter architecture: \
                  entities, models, repositories with remote and local data sources, \
                  use cases, state notifiers and presentation widgets.",
    after_help = "EXAMPLES:\n\
        \x20 strata new shop --feature product --feature cart\n\
        \x20 strata feature order --field id:String --field total:double\n\
        \x20 strata repository order --method getAll --method watchAll\n\
        \x20 strata completions bash > /usr/share/bash-completion/completions/strata",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new Flutter project.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 strata new shop\n\
            \x20 strata new shop --org com.acme --state bloc --feature product\n\
            \x20 strata new shop --arch layered --tests --output ~/code"
    )]
    New(NewArgs),

    /// Add a feature slice to an existing project.
    #[command(
        visible_alias = "f",
        about = "Generate a feature slice",
        after_help = "EXAMPLES:\n\
            \x20 strata feature task\n\
            \x20 strata feature task --field title:String --field done:bool=false\n\
            \x20 strata feature order --entity order_line --no-local --value-type"
    )]
    Feature(FeatureArgs),

    /// Generate a single domain entity.
    #[command(
        visible_alias = "e",
        about = "Generate an entity",
        after_help = "EXAMPLES:\n\
            \x20 strata entity user --field name:String --field age:int?"
    )]
    Entity(EntityArgs),

    /// Generate a single data model.
    #[command(
        visible_alias = "m",
        about = "Generate a model",
        after_help = "EXAMPLES:\n\
            \x20 strata model user --field name:String --value-type\n\
            \x20 strata model user --no-codec"
    )]
    Model(ModelArgs),

    /// Generate a repository with its data sources.
    #[command(
        visible_alias = "repo",
        about = "Generate a repository",
        after_help = "EXAMPLES:\n\
            \x20 strata repository order\n\
            \x20 strata repository order --method getAll --method search --no-local\n\
            \x20 strata repository catalog --entity product"
    )]
    Repository(RepositoryArgs),

    /// List repository methods and supported styles.
    #[command(
        visible_alias = "ls",
        about = "List methods and styles",
        after_help = "EXAMPLES:\n\
            \x20 strata list\n\
            \x20 strata list methods --format csv\n\
            \x20 strata list states --format json"
    )]
    List(ListArgs),

    /// Initialise a strata configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 strata init           # user config\n\
            \x20 strata init --local   # .strata.toml in the current directory"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 strata completions bash > ~/.local/share/bash-completion/completions/strata\n\
            \x20 strata completions zsh  > ~/.zfunc/_strata\n\
            \x20 strata completions fish > ~/.config/fish/completions/strata.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the strata configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 strata config get defaults.organization\n\
            \x20 strata config set defaults.state_management bloc\n\
            \x20 strata config list"
    )]
    Config(ConfigCommands),
}

impl Commands {
    /// Commands that create or rewrite the config file named by `--config`.
    pub fn writes_config(&self) -> bool {
        matches!(
            self,
            Self::Init(_) | Self::Config(ConfigCommands::Set { .. })
        )
    }
}

// ── shared argument groups ────────────────────────────────────────────────────

/// Where and how generated files are written.
#[derive(Debug, Clone, Default, Args)]
pub struct WriteArgs {
    /// Directory to write into.  Projects get a new directory inside it.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation and write immediately")]
    pub yes: bool,

    /// Replace files that already exist.
    #[arg(long = "force", help = "Overwrite existing files")]
    pub force: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,
}

impl WriteArgs {
    pub fn output_dir(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// `name:Type` field specifications.
#[derive(Debug, Clone, Default, Args)]
pub struct FieldArgs {
    #[arg(
        long = "field",
        value_name = "NAME:TYPE",
        help = "Field as name:Type, name:Type? or name:Type=default (repeatable)"
    )]
    pub fields: Vec<String>,
}

/// Which data sources a repository talks to.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct SourceArgs {
    #[arg(long = "no-remote", help = "Skip the remote data source")]
    pub no_remote: bool,

    #[arg(long = "no-local", help = "Skip the local data source")]
    pub no_local: bool,
}

/// Model equality style and wire codec.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct ModelStyleArgs {
    #[arg(
        long = "value-type",
        overrides_with = "no_value_type",
        help = "Extend Equatable instead of hand-written equality"
    )]
    pub value_type: bool,

    #[arg(
        long = "no-value-type",
        overrides_with = "value_type",
        help = "Hand-written ==, hashCode and toString"
    )]
    pub no_value_type: bool,

    #[arg(long = "no-codec", help = "Omit fromJson/toJson")]
    pub no_codec: bool,
}

impl ModelStyleArgs {
    pub fn use_value_type(&self, default: bool) -> bool {
        toggle(self.value_type, self.no_value_type, default)
    }
}

/// Test scaffold toggle.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct TestArgs {
    #[arg(long = "tests", overrides_with = "no_tests", help = "Generate test scaffolds")]
    pub tests: bool,

    #[arg(long = "no-tests", overrides_with = "tests", help = "Skip test scaffolds")]
    pub no_tests: bool,
}

impl TestArgs {
    pub fn include_tests(&self, default: bool) -> bool {
        toggle(self.tests, self.no_tests, default)
    }
}

fn toggle(on: bool, off: bool, default: bool) -> bool {
    match (on, off) {
        (true, _) => true,
        (_, true) => false,
        _ => default,
    }
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `strata new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name; the package and directory use its snake_case form.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Reverse-domain organization, e.g. `com.acme`.
    #[arg(long = "org", value_name = "ORG", help = "Organization (reverse domain)")]
    pub organization: Option<String>,

    #[arg(
        short = 'd',
        long = "description",
        value_name = "TEXT",
        help = "One-line project description"
    )]
    pub description: Option<String>,

    /// Feature slices to generate with the project.
    #[arg(
        short = 'F',
        long = "feature",
        value_name = "NAME",
        help = "Feature to include (repeatable)"
    )]
    pub features: Vec<String>,

    #[arg(short = 'a', long = "arch", value_name = "ARCH", value_enum, help = "Architecture style")]
    pub architecture: Option<Architecture>,

    #[arg(short = 's', long = "state", value_name = "STATE", value_enum, help = "State management")]
    pub state: Option<StateLib>,

    #[command(flatten)]
    pub tests: TestArgs,

    #[command(flatten)]
    pub write: WriteArgs,
}

// ── feature ───────────────────────────────────────────────────────────────────

/// Arguments for `strata feature`.
#[derive(Debug, Args)]
pub struct FeatureArgs {
    #[arg(value_name = "NAME", help = "Feature name")]
    pub name: String,

    #[command(flatten)]
    pub fields: FieldArgs,

    /// Extra entities, each generated as an entity + model pair.
    #[arg(long = "entity", value_name = "NAME", help = "Additional entity (repeatable)")]
    pub entities: Vec<String>,

    #[arg(long = "no-repository", help = "Skip the repository implementation")]
    pub no_repository: bool,

    #[arg(long = "no-usecases", help = "Skip the use cases")]
    pub no_usecases: bool,

    #[command(flatten)]
    pub sources: SourceArgs,

    #[command(flatten)]
    pub model: ModelStyleArgs,

    #[arg(short = 'a', long = "arch", value_name = "ARCH", value_enum, help = "Architecture style")]
    pub architecture: Option<Architecture>,

    #[arg(short = 's', long = "state", value_name = "STATE", value_enum, help = "State management")]
    pub state: Option<StateLib>,

    #[command(flatten)]
    pub tests: TestArgs,

    #[command(flatten)]
    pub write: WriteArgs,
}

// ── entity / model / repository ───────────────────────────────────────────────

/// Arguments for `strata entity`.
#[derive(Debug, Args)]
pub struct EntityArgs {
    #[arg(value_name = "NAME", help = "Entity name")]
    pub name: String,

    #[command(flatten)]
    pub fields: FieldArgs,

    #[command(flatten)]
    pub write: WriteArgs,
}

/// Arguments for `strata model`.
#[derive(Debug, Args)]
pub struct ModelArgs {
    #[arg(value_name = "NAME", help = "Model name")]
    pub name: String,

    #[command(flatten)]
    pub fields: FieldArgs,

    #[command(flatten)]
    pub style: ModelStyleArgs,

    #[command(flatten)]
    pub write: WriteArgs,
}

/// Arguments for `strata repository`.
#[derive(Debug, Args)]
pub struct RepositoryArgs {
    #[arg(value_name = "NAME", help = "Repository name")]
    pub name: String,

    /// Catalog or custom method names; none means the canonical five.
    #[arg(
        short = 'm',
        long = "method",
        value_name = "METHOD",
        help = "Method to include (repeatable, see `strata list methods`)"
    )]
    pub methods: Vec<String>,

    #[arg(long = "entity", value_name = "NAME", help = "Entity served (default: NAME)")]
    pub entity: Option<String>,

    #[command(flatten)]
    pub sources: SourceArgs,

    #[command(flatten)]
    pub write: WriteArgs,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `strata list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// What to list; everything when omitted.
    #[arg(value_enum, value_name = "TOPIC", help = "Only list this topic")]
    pub topic: Option<ListTopic>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListTopic {
    /// Repository method catalog.
    Methods,
    /// Architecture styles.
    Architectures,
    /// State-management styles.
    States,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `strata init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.strata.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `strata completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `strata config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.organization`.
        key: String,
    },
    /// Set a configuration key to a value.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Supported architecture styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Architecture {
    /// One directory per feature.
    #[value(alias = "feature-first")]
    Clean,
    /// Shared layer directories.
    #[value(alias = "layer-first")]
    Layered,
}

impl From<Architecture> for ArchitectureStyle {
    fn from(arch: Architecture) -> Self {
        match arch {
            Architecture::Clean => Self::Clean,
            Architecture::Layered => Self::Layered,
        }
    }
}

/// Supported state-management packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum StateLib {
    Riverpod,
    /// Also accepted as `cubit`.
    #[value(alias = "cubit")]
    Bloc,
    Provider,
}

impl From<StateLib> for StateManagement {
    fn from(state: StateLib) -> Self {
        match state {
            StateLib::Riverpod => Self::Riverpod,
            StateLib::Bloc => Self::Bloc,
            StateLib::Provider => Self::Provider,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn feature_collects_repeated_fields() {
        let cli = Cli::parse_from([
            "strata",
            "feature",
            "task",
            "--field",
            "title:String",
            "--field",
            "done:bool=false",
            "--no-local",
        ]);
        let Commands::Feature(args) = cli.command else {
            panic!("expected feature");
        };
        assert_eq!(args.fields.fields, ["title:String", "done:bool=false"]);
        assert!(args.sources.no_local);
        assert!(!args.sources.no_remote);
        assert!(args.write.output.is_none());
    }

    #[test]
    fn only_init_and_set_write_config() {
        let writes = |argv: &[&str]| {
            Cli::parse_from(["strata"].iter().chain(argv))
                .command
                .writes_config()
        };
        assert!(writes(&["init"]));
        assert!(writes(&["config", "set", "output.format", "json"]));
        assert!(!writes(&["config", "get", "output.format"]));
        assert!(!writes(&["list"]));
    }

    #[test]
    fn new_accepts_features_and_styles() {
        let cli = Cli::parse_from([
            "strata", "new", "shop", "-F", "product", "-F", "cart", "--state", "cubit", "--arch",
            "layered", "--org", "com.acme", "-o", "/tmp/out",
        ]);
        let Commands::New(args) = cli.command else {
            panic!("expected new");
        };
        assert_eq!(args.features, ["product", "cart"]);
        assert_eq!(args.state, Some(StateLib::Bloc));
        assert_eq!(args.architecture, Some(Architecture::Layered));
        assert_eq!(args.write.output_dir(), PathBuf::from("/tmp/out"));
    }

    #[test]
    fn later_toggle_wins() {
        let cli = Cli::parse_from(["strata", "new", "shop", "--tests", "--no-tests"]);
        let Commands::New(args) = cli.command else {
            panic!("expected new");
        };
        assert!(!args.tests.include_tests(true));

        let cli = Cli::parse_from(["strata", "model", "user", "--no-value-type", "--value-type"]);
        let Commands::Model(args) = cli.command else {
            panic!("expected model");
        };
        assert!(args.style.use_value_type(false));
    }

    #[test]
    fn toggles_fall_back_to_default() {
        assert!(TestArgs::default().include_tests(true));
        assert!(!TestArgs::default().include_tests(false));
        assert!(!ModelStyleArgs::default().use_value_type(false));
    }

    #[test]
    fn repository_methods_and_alias() {
        let cli = Cli::parse_from(["strata", "repo", "order", "-m", "getAll", "-m", "search"]);
        let Commands::Repository(args) = cli.command else {
            panic!("expected repository");
        };
        assert_eq!(args.methods, ["getAll", "search"]);
        assert_eq!(args.write.output_dir(), PathBuf::from("."));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["strata", "-q", "-v", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn value_enums_convert_to_core() {
        assert_eq!(ArchitectureStyle::from(Architecture::Clean), ArchitectureStyle::Clean);
        assert_eq!(StateManagement::from(StateLib::Provider), StateManagement::Provider);
    }
}
