//! Dart source templates.
//!
//! Every template is a plain Rust struct with a `generate()` method that
//! returns a [`FileSet`](crate::domain::FileSet). Output is assembled with
//! [`SourceWriter`], a small line-oriented builder; there is no template
//! language and no I/O.
//!
//! ## Layout
//!
//! ```text
//! entity.rs        {Pascal}Entity
//! model.rs         {Pascal}Model (value-type or plain class)
//! repository.rs    interface, implementation, remote + local data sources
//! usecase.rs       Get/Create/Update/Delete use cases
//! state.rs         {Pascal}State and the mutation notifier
//! presentation.rs  pages and widgets
//! test_scaffold.rs placeholder test modules
//! feature.rs       one vertical feature slice
//! project.rs       root files plus every feature
//! ```
//!
//! Paths produced by the feature-level templates are relative to the
//! feature directory. The [`paths`] module is the only place that knows them,
//! so cross-file imports always match the files actually emitted.

pub mod entity;
pub mod feature;
pub mod model;
pub mod presentation;
pub mod project;
pub mod repository;
pub mod state;
pub mod test_scaffold;
pub mod usecase;

pub use entity::EntityTemplate;
pub use feature::FeatureTemplate;
pub use model::{EntityLink, ModelTemplate};
pub use project::ProjectTemplate;
pub use repository::RepositoryTemplate;

const INDENT: &str = "  ";

// ── SourceWriter ─────────────────────────────────────────────────────────────

/// Line-oriented source builder with two-space indentation.
#[derive(Debug, Default)]
pub struct SourceWriter {
    buf: String,
    depth: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one line at the current indentation. Empty input writes a bare newline.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.buf.push_str(INDENT);
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
        self
    }

    pub fn lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for l in lines {
            self.line(l);
        }
        self
    }

    /// Blank separator line; never doubles an existing one.
    pub fn blank(&mut self) -> &mut Self {
        if !self.buf.is_empty() && !self.buf.ends_with("\n\n") {
            self.buf.push('\n');
        }
        self
    }

    /// `///` doc comment, one line per input line.
    pub fn doc(&mut self, text: impl AsRef<str>) -> &mut Self {
        for l in text.as_ref().lines() {
            if l.is_empty() {
                self.line("///");
            } else {
                self.line(format!("/// {l}"));
            }
        }
        self
    }

    /// Write `header` and indent what follows until [`SourceWriter::close`].
    pub fn open(&mut self, header: impl AsRef<str>) -> &mut Self {
        self.line(header);
        self.depth += 1;
        self
    }

    pub fn close(&mut self, footer: impl AsRef<str>) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.line(footer)
    }

    pub fn indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    pub fn dedent(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }

    /// Import block: `dart:` first, then `package:`, then relative paths,
    /// each group sorted and separated by a blank line.
    pub fn imports<I, S>(&mut self, imports: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut all: Vec<String> = imports.into_iter().map(Into::into).collect();
        all.sort();
        all.dedup();

        let groups = [
            all.iter().filter(|i| i.starts_with("dart:")).collect::<Vec<_>>(),
            all.iter().filter(|i| i.starts_with("package:")).collect(),
            all.iter()
                .filter(|i| !i.starts_with("dart:") && !i.starts_with("package:"))
                .collect(),
        ];
        for group in groups.iter().filter(|g| !g.is_empty()) {
            for import in group {
                self.line(format!("import {};", dart_string(import)));
            }
            self.blank();
        }
        self
    }

    /// The finished source: exactly one trailing newline.
    pub fn finish(self) -> String {
        let mut out = self.buf.trim_end().to_string();
        out.push('\n');
        out
    }
}

// ── Dart helpers ─────────────────────────────────────────────────────────────

/// Single-quoted Dart string literal.
pub fn dart_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Import path from the file at `from` to the file at `to`, both relative
/// to the same root.
pub fn relative_import(from: &str, to: &str) -> String {
    let from_dir: Vec<&str> = {
        let mut parts: Vec<&str> = from.split('/').collect();
        parts.pop();
        parts
    };
    let to_parts: Vec<&str> = to.split('/').collect();

    let common = from_dir
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();
    // Never consume the file name itself.
    let common = common.min(to_parts.len().saturating_sub(1));

    let mut segments: Vec<&str> = vec![".."; from_dir.len() - common];
    segments.extend(&to_parts[common..]);
    segments.join("/")
}

/// `Future<void> foo() async { throw UnimplementedError(...) }` body line.
pub(crate) fn unimplemented(what: &str) -> String {
    format!("throw UnimplementedError({});", dart_string(&format!("{what} is not implemented")))
}

// ── Paths ────────────────────────────────────────────────────────────────────

/// Feature-relative file paths of every artifact.
pub mod paths {
    use crate::domain::value_objects::StateManagement;

    pub fn entity(snake: &str) -> String {
        format!("domain/entities/{snake}_entity.dart")
    }

    pub fn model(snake: &str) -> String {
        format!("data/models/{snake}_model.dart")
    }

    pub fn repository(snake: &str) -> String {
        format!("domain/repositories/{snake}_repository.dart")
    }

    pub fn repository_impl(snake: &str) -> String {
        format!("data/repositories/{snake}_repository_impl.dart")
    }

    pub fn remote_data_source(snake: &str) -> String {
        format!("data/datasources/{snake}_remote_data_source.dart")
    }

    pub fn local_data_source(snake: &str) -> String {
        format!("data/datasources/{snake}_local_data_source.dart")
    }

    pub fn use_case(verb: &str, snake: &str) -> String {
        format!("domain/usecases/{verb}_{snake}_usecase.dart")
    }

    pub fn state(snake: &str) -> String {
        format!("presentation/state/{snake}_state.dart")
    }

    pub fn notifier(snake: &str, style: StateManagement) -> String {
        format!("presentation/state/{snake}_{}.dart", style.file_suffix())
    }

    pub fn list_page(snake: &str) -> String {
        format!("presentation/pages/{snake}_list_page.dart")
    }

    pub fn detail_page(snake: &str) -> String {
        format!("presentation/pages/{snake}_detail_page.dart")
    }

    pub fn card(snake: &str) -> String {
        format!("presentation/widgets/{snake}_card.dart")
    }

    pub fn list_widget(snake: &str) -> String {
        format!("presentation/widgets/{snake}_list_widget.dart")
    }

    pub fn form(snake: &str) -> String {
        format!("presentation/widgets/{snake}_form.dart")
    }
}
