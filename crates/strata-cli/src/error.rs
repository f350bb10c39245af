//! Errors as the user sees them.
//!
//! [`CliError`] wraps core failures and adds the ones only the binary can
//! hit (bad flags, config files, prompts). Each error knows its exit code
//! and a few lines of advice; `main` renders both.

use std::error::Error as _;
use std::fmt::Write as _;

use owo_colors::{OwoColorize, Style};
use thiserror::Error;

use strata_core::error::{ErrorCategory as CoreCategory, StrataError};

pub type CliResult<T> = Result<T, CliError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Flag values clap accepted but strata cannot use.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// A config file is unreadable, malformed or unwritable.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Unknown config key '{key}'")]
    UnknownConfigKey { key: String },

    /// Anything raised while generating or writing files.
    #[error(transparent)]
    Core(#[from] StrataError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The confirmation prompt was answered "no".
    #[error("Operation cancelled")]
    Cancelled,

    /// A prompt was needed in a build without the `interactive` feature.
    #[cfg_attr(feature = "interactive", allow(dead_code))]
    #[error("'{feature}' support is not compiled in")]
    FeatureNotAvailable { feature: &'static str },
}

impl From<std::io::Error> for CliError {
    fn from(source: std::io::Error) -> Self {
        Self::IoError {
            message: source.to_string(),
            source,
        }
    }
}

/// What kind of failure, which decides the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad names, field specs or flags, and refusals to overwrite.
    UserError,
    NotFound,
    Configuration,
    Internal,
}

impl CliError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => {
                vec!["Run the command with --help to see accepted values".into()]
            }
            Self::ConfigError { .. } => vec![
                "'strata config path' prints the file being used".into(),
                "'strata init --force' rewrites it with defaults".into(),
            ],
            Self::UnknownConfigKey { .. } => std::iter::once("Known keys:".to_string())
                .chain(crate::config::KEYS.iter().map(|key| format!("  {key}")))
                .collect(),
            Self::Core(err) => err.suggestions(),
            Self::IoError { .. } => vec![
                "Check that the output directory is writable".into(),
            ],
            Self::Cancelled => vec!["Nothing was written".into()],
            Self::FeatureNotAvailable { feature } => vec![
                format!("Reinstall with: cargo install strata-cli --features {feature}"),
                "Or pass --yes to skip the prompt".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::Cancelled => ErrorCategory::UserError,
            Self::ConfigError { .. } | Self::FeatureNotAvailable { .. } => {
                ErrorCategory::Configuration
            }
            Self::UnknownConfigKey { .. } => ErrorCategory::NotFound,
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::Core(err) => match err.category() {
                CoreCategory::Validation | CoreCategory::Conflict => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
        }
    }

    /// 2 user error, 3 not found, 4 configuration, 1 anything else.
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// The message block printed on stderr. `verbose` adds the cause chain.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: Style| {
            if color {
                text.style(style).to_string()
            } else {
                text.to_owned()
            }
        };
        let red = Style::new().red();

        let mut out = String::new();
        let _ = writeln!(
            out,
            "\n{} {}",
            paint("Error:", red.bold()),
            paint(&self.to_string(), red)
        );

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                let _ = writeln!(
                    out,
                    "  {}",
                    paint(&format!("caused by: {err}"), Style::new().dimmed())
                );
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let _ = writeln!(out, "\n{}", paint("Suggestions:", Style::new().yellow().bold()));
            for suggestion in &suggestions {
                let _ = writeln!(out, "  {suggestion}");
            }
        }

        if !verbose {
            let _ = writeln!(
                out,
                "\n{}",
                paint("Run with -v for more detail.", Style::new().dimmed())
            );
        }
        out
    }

    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(exit_code = self.exit_code(), "{self}")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(exit_code = self.exit_code(), "{self}")
            }
        }
        if let Some(cause) = self.source() {
            tracing::debug!("caused by: {cause}");
        }
    }
}

/// Attach a context message while converting into [`CliError`].
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, context: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, context: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|source| CliError::IoError {
            message: context().into(),
            source,
        })
    }
}

impl<T> IntoCli<T> for Result<T, StrataError> {
    /// Core messages already name the failing path or value, so the
    /// context only reaches the debug log.
    fn with_cli_context<F, S>(self, context: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|err| {
            tracing::debug!(context = %context().into(), "core error");
            CliError::Core(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    use strata_core::application::ApplicationError;
    use strata_core::domain::DomainError;

    fn conflict() -> CliError {
        StrataError::from(ApplicationError::FileConflict {
            paths: vec![PathBuf::from("lib/a.dart")],
        })
        .into()
    }

    fn io_error(message: &str, cause: &str) -> CliError {
        CliError::IoError {
            message: message.into(),
            source: io::Error::other(cause.to_string()),
        }
    }

    #[test]
    fn conflict_suggests_force() {
        assert!(conflict().suggestions().iter().any(|s| s.contains("--force")));
    }

    #[test]
    fn unknown_key_lists_known_keys() {
        let err = CliError::UnknownConfigKey {
            key: "defaults.lang".into(),
        };
        let suggestions = err.suggestions();
        assert_eq!(suggestions.len(), crate::config::KEYS.len() + 1);
        assert!(suggestions.iter().any(|s| s.contains("defaults.organization")));
    }

    #[test]
    fn core_suggestions_pass_through() {
        let core = StrataError::from(DomainError::MalformedFieldSpec {
            spec: "badspec".into(),
            reason: "missing ':' separator between name and type".into(),
        });
        let expected = core.suggestions();
        assert_eq!(CliError::Core(core).suggestions(), expected);
    }

    #[test]
    fn core_message_is_not_prefixed() {
        assert!(conflict().to_string().starts_with("1 file(s) already exist"));
    }

    #[test]
    fn exit_codes_follow_category() {
        let invalid = CliError::InvalidInput {
            message: "x".into(),
            source: None,
        };
        let config = CliError::ConfigError {
            message: "x".into(),
            source: None,
        };
        assert_eq!(invalid.exit_code(), 2);
        assert_eq!(conflict().exit_code(), 2);
        assert_eq!(CliError::Cancelled.exit_code(), 2);
        assert_eq!(CliError::UnknownConfigKey { key: "x".into() }.exit_code(), 3);
        assert_eq!(config.exit_code(), 4);
        assert_eq!(io_error("x", "e").exit_code(), 1);
    }

    #[test]
    fn plain_render_has_no_escape_codes() {
        let text = conflict().render(false, false);
        assert!(text.contains("Error: 1 file(s) already exist"));
        assert!(text.contains("Suggestions:"));
        assert!(text.contains("-v"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn verbose_render_shows_cause_chain() {
        let text = io_error("writing config", "disk full").render(true, false);
        assert!(text.contains("caused by: disk full"));
        assert!(!text.contains("Run with -v"));
    }

    #[test]
    fn coloured_render_uses_ansi() {
        assert!(conflict().render(false, true).contains('\u{1b}'));
    }

    #[test]
    fn io_context_becomes_the_message() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let err = result.with_cli_context(|| "reading config").unwrap_err();
        assert!(matches!(&err, CliError::IoError { message, .. } if message == "reading config"));
    }

    #[test]
    fn core_context_keeps_the_core_error() {
        let result: Result<(), StrataError> = Err(StrataError::Internal {
            message: "boom".into(),
        });
        let err = result.with_cli_context(|| "writing files").unwrap_err();
        assert!(matches!(err, CliError::Core(StrataError::Internal { .. })));
    }
}
