//! Everything the CLI prints on stdout goes through [`OutputManager`].
//!
//! Human-facing lines respect `--quiet` and colour settings. JSON payloads
//! are the command's result and are always written.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Style};
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    color: bool,
    term: Term,
}

impl OutputManager {
    /// `--output-format` wins over `output.format`; `auto` becomes `human`
    /// on a terminal and `plain` everywhere else.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = match args.output_format {
            OutputFormat::Auto => OutputFormat::from_config(&config.output.format),
            explicit => explicit,
        };
        let format = match format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            resolved => resolved,
        };

        Self {
            format,
            quiet: args.quiet,
            color: format == OutputFormat::Human && !args.no_color && !config.output.no_color,
            term: Term::stdout(),
        }
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.line(None, msg, Style::new())
    }

    /// `✓ msg`
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.line(Some('\u{2713}'), msg, Style::new().green())
    }

    /// `⚠ msg`
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.line(Some('\u{26a0}'), msg, Style::new().yellow())
    }

    /// `ℹ msg`
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.line(Some('\u{2139}'), msg, Style::new().blue())
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        self.line(None, text, Style::new().cyan().bold())
    }

    /// Secondary text such as a path listed under a summary.
    pub fn detail(&self, text: &str) -> io::Result<()> {
        self.line(None, text, Style::new().dimmed())
    }

    /// Pretty-printed JSON; ignores `--quiet`.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    /// Stderr spinner for the write phase. Hidden unless a human is
    /// watching a terminal.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.quiet || self.is_json() || !io::stderr().is_terminal() {
            return ProgressBar::hidden();
        }
        let template = if self.color {
            "{spinner:.cyan} {msg}"
        } else {
            "{spinner} {msg}"
        };
        let bar = ProgressBar::new_spinner().with_message(msg.to_owned());
        if let Ok(style) = ProgressStyle::with_template(template) {
            bar.set_style(style);
        }
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    }

    pub fn supports_color(&self) -> bool {
        self.color
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    fn line(&self, marker: Option<char>, text: &str, style: Style) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = match (marker, self.color) {
            (None, false) => text.to_owned(),
            (None, true) => text.style(style).to_string(),
            (Some(m), false) => format!("{m} {text}"),
            (Some(m), true) => format!("{} {}", m.style(style.bold()), text.style(style)),
        };
        self.term.write_line(&line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(quiet: bool, no_color: bool, output_format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format,
            log_file: None,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_lines_are_dropped_silently() {
        let out = manager(true, true, OutputFormat::Plain);
        assert!(out.print("hello").is_ok());
        assert!(out.success("done").is_ok());
        assert!(out.warning("careful").is_ok());
    }

    #[test]
    fn colour_needs_human_format() {
        assert!(manager(false, false, OutputFormat::Human).supports_color());
        assert!(!manager(false, true, OutputFormat::Human).supports_color());
        assert!(!manager(false, false, OutputFormat::Plain).supports_color());
        assert!(!manager(false, false, OutputFormat::Json).supports_color());
    }

    #[test]
    fn config_colour_switch_is_honoured() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Human,
            log_file: None,
        };
        let mut config = AppConfig::default();
        config.output.no_color = true;
        assert!(!OutputManager::new(&args, &config).supports_color());
    }

    #[test]
    fn config_format_applies_when_flag_is_auto() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Auto,
            log_file: None,
        };
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        assert!(OutputManager::new(&args, &config).is_json());
    }

    #[test]
    fn flag_beats_config_format() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Plain,
            log_file: None,
        };
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        assert!(!OutputManager::new(&args, &config).is_json());
    }

    #[test]
    fn json_runs_hide_the_spinner() {
        let out = manager(false, true, OutputFormat::Json);
        assert!(out.spinner("writing").is_hidden());
    }
}
