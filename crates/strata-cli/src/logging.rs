//! Tracing setup for the binary.
//!
//! The library crates emit spans and events; this is the only place a
//! subscriber is installed. Terminal logs go to stderr so stdout stays
//! reserved for results. `--log-file` adds a second, JSON-formatted sink.
//!
//! Levels: `--quiet` error, default warn, `-v` info, `-vv` debug, `-vvv`
//! trace. A set `RUST_LOG` replaces the whole filter.

use std::io::IsTerminal as _;
use std::path::Path;

use anyhow::Context as _;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Crates whose events are shown without `RUST_LOG`.
const OWN_TARGETS: [&str; 3] = ["strata", "strata_core", "strata_adapters"];

/// Install the global subscriber.
///
/// Call once, first thing after argument parsing. The returned guard owns
/// the log file's background writer; dropping it flushes pending lines.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<Option<WorkerGuard>> {
    let terminal = tracing_subscriber::fmt::layer()
        .with_target(false)
        .without_time()
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    let mut guard = None;
    let file = match args.log_file.as_deref() {
        Some(path) => {
            let (writer, flush_guard) = file_writer(path)?;
            guard = Some(flush_guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(writer)
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter(level(args)))
        .with(terminal)
        .with(file)
        .try_init()
        .context("a tracing subscriber is already installed")?;

    Ok(guard)
}

fn filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives: Vec<String> = OWN_TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect();
        EnvFilter::new(directives.join(","))
    })
}

fn level(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Non-blocking appender for `path`, creating its directory first.
fn file_writer(path: &Path) -> anyhow::Result<(NonBlocking, WorkerGuard)> {
    let file_name = path
        .file_name()
        .with_context(|| format!("log file '{}' has no file name", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("cannot create log directory '{}'", dir.display()))?;

    Ok(tracing_appender::non_blocking(
        tracing_appender::rolling::never(dir, file_name),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn args(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
            output_format: OutputFormat::Auto,
            log_file: None,
        }
    }

    #[test]
    fn verbosity_maps_to_levels() {
        let cases = [
            (0, false, LevelFilter::WARN),
            (1, false, LevelFilter::INFO),
            (2, false, LevelFilter::DEBUG),
            (3, false, LevelFilter::TRACE),
            (9, false, LevelFilter::TRACE),
            (0, true, LevelFilter::ERROR),
        ];
        for (verbose, quiet, expected) in cases {
            assert_eq!(level(&args(verbose, quiet)), expected, "-{verbose} quiet={quiet}");
        }
    }

    // clap rejects -q with -v, but the mapping must still favour quiet.
    #[test]
    fn quiet_beats_verbose() {
        assert_eq!(level(&args(3, true)), LevelFilter::ERROR);
    }

    #[test]
    fn log_file_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/strata.log");
        let (_writer, _guard) = file_writer(&path).unwrap();
        assert!(dir.path().join("logs").is_dir());
    }

    #[test]
    fn root_path_has_no_file_name() {
        assert!(file_writer(Path::new("/")).is_err());
    }
}
