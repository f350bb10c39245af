//! A whole application: root files plus one slice per feature.
//!
//! Feature files land under the architecture's feature directory, so a
//! project's [`FileSet`] is rooted at the project directory.

use crate::domain::error::DomainError;
use crate::domain::file_set::FileSet;
use crate::domain::naming::Identifier;
use crate::domain::request::DEFAULT_ORGANIZATION;
use crate::domain::templates::presentation::PresentationTemplate;
use crate::domain::templates::{FeatureTemplate, SourceWriter, dart_string};
use crate::domain::validation::DomainValidator;
use crate::domain::value_objects::{ArchitectureStyle, StateManagement};

const DART_SDK: &str = ">=3.3.0 <4.0.0";
const EQUATABLE: (&str, &str) = ("equatable", "^2.0.5");
const FLUTTER_LINTS: (&str, &str) = ("flutter_lints", "^4.0.0");
const VERSION: &str = "1.0.0";

#[derive(Debug, Clone)]
pub struct ProjectTemplate {
    name: Identifier,
    organization: String,
    description: Option<String>,
    architecture: ArchitectureStyle,
    state_management: StateManagement,
    include_tests: bool,
    features: Vec<FeatureTemplate>,
}

impl ProjectTemplate {
    pub fn new(name: &Identifier) -> Self {
        Self {
            name: name.clone(),
            organization: DEFAULT_ORGANIZATION.to_string(),
            description: None,
            architecture: ArchitectureStyle::default(),
            state_management: StateManagement::default(),
            include_tests: false,
            features: Vec::new(),
        }
    }

    /// # Errors
    ///
    /// `InvalidOrganization` unless the identifier is reverse-domain form.
    pub fn organization(mut self, organization: &str) -> Result<Self, DomainError> {
        DomainValidator::validate_organization(organization)?;
        self.organization = organization.to_string();
        Ok(self)
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn architecture(mut self, style: ArchitectureStyle) -> Self {
        self.architecture = style;
        self
    }

    /// Applies to the project manifest and to every feature's notifier.
    #[must_use]
    pub fn state_management(mut self, style: StateManagement) -> Self {
        self.state_management = style;
        self
    }

    #[must_use]
    pub fn tests(mut self, enabled: bool) -> Self {
        self.include_tests = enabled;
        self
    }

    /// Adds a feature; a later feature with the same name replaces the earlier one.
    #[must_use]
    pub fn with_feature(mut self, feature: FeatureTemplate) -> Self {
        self.features
            .retain(|f| f.name().snake() != feature.name().snake());
        self.features.push(feature);
        self
    }

    pub fn package_name(&self) -> &str {
        self.name.snake()
    }

    pub fn application_id(&self) -> String {
        format!("{}.{}", self.organization, self.package_name())
    }

    fn title(&self) -> String {
        self.name.sentence()
    }

    fn description_text(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| format!("{} Flutter application.", self.title()))
    }

    // ── Root files ───────────────────────────────────────────────────────

    pub fn render_pubspec(&self) -> String {
        let (state_pkg, state_version) = self.state_management.package();
        let mut deps = vec![EQUATABLE, (state_pkg, state_version)];
        deps.sort();

        let mut out = String::new();
        out.push_str(&format!("name: {}\n", self.package_name()));
        out.push_str(&format!("description: {}\n", yaml_string(&self.description_text())));
        out.push_str("publish_to: 'none'\n");
        out.push_str(&format!("version: {VERSION}+1\n\n"));
        out.push_str(&format!("environment:\n  sdk: '{DART_SDK}'\n\n"));
        out.push_str("dependencies:\n  flutter:\n    sdk: flutter\n");
        for (pkg, version) in deps {
            out.push_str(&format!("  {pkg}: {version}\n"));
        }
        out.push_str("\ndev_dependencies:\n  flutter_test:\n    sdk: flutter\n");
        out.push_str(&format!("  {}: {}\n", FLUTTER_LINTS.0, FLUTTER_LINTS.1));
        out.push_str("\nflutter:\n  uses-material-design: true\n");
        out
    }

    pub fn render_analysis_options(&self) -> String {
        "include: package:flutter_lints/flutter.yaml\n\
         \n\
         linter:\n  \
           rules:\n    \
             - prefer_const_constructors\n    \
             - prefer_final_fields\n    \
             - prefer_single_quotes\n"
            .to_string()
    }

    pub fn render_main(&self) -> String {
        let mut w = SourceWriter::new();
        let mut imports = vec!["package:flutter/material.dart".to_string(), "app.dart".to_string()];
        if self.state_management == StateManagement::Riverpod {
            imports.push(self.state_management.import().to_string());
        }
        w.imports(imports);
        w.open("void main() {");
        match self.state_management {
            StateManagement::Riverpod => w.line("runApp(const ProviderScope(child: App()));"),
            _ => w.line("runApp(const App());"),
        };
        w.close("}");
        w.finish()
    }

    pub fn render_app(&self) -> String {
        let pages: Vec<(String, String)> = self
            .features
            .iter()
            .map(|f| {
                let page = format!("{}ListPage", f.name().pascal());
                let import = self
                    .architecture
                    .package_path(f.name().snake(), &f.list_page_path());
                (page, import)
            })
            .collect();

        let mut w = SourceWriter::new();
        let mut imports = vec![
            "package:flutter/material.dart".to_string(),
            "core/app_config.dart".to_string(),
        ];
        imports.extend(pages.iter().map(|(_, import)| import.clone()));
        w.imports(imports);

        w.doc("Root widget: theme and routes.");
        w.open("class App extends StatelessWidget {");
        w.line("const App({super.key});");
        w.blank();
        w.line("@override");
        w.open("Widget build(BuildContext context) {");
        w.open("return MaterialApp(");
        w.line("title: AppConfig.appName,");
        w.line("theme: ThemeData(colorSchemeSeed: Colors.indigo, useMaterial3: true),");
        match pages.first() {
            Some((first, _)) => {
                w.line(format!("initialRoute: {first}.routeName,"));
                w.open("routes: {");
                for (page, _) in &pages {
                    w.line(format!("{page}.routeName: (context) => const {page}(),"));
                }
                w.close("},");
            }
            None => {
                w.line("home: const Scaffold(body: Center(child: Text(AppConfig.appName))),");
            }
        }
        w.close(");");
        w.close("}");
        w.close("}");
        w.finish()
    }

    pub fn render_app_config(&self) -> String {
        let mut w = SourceWriter::new();
        w.doc("Build-time application constants.");
        w.open("abstract final class AppConfig {");
        w.line(format!(
            "static const String appName = {};",
            dart_string(&self.title())
        ));
        w.line(format!(
            "static const String applicationId = {};",
            dart_string(&self.application_id())
        ));
        w.line(format!("static const String version = {};", dart_string(VERSION)));
        w.close("}");
        w.finish()
    }

    pub fn render_readme(&self) -> String {
        let mut out = format!("# {}\n\n{}\n\n", self.title(), self.description_text());
        out.push_str(&format!(
            "Application id: `{}`  \nArchitecture: {} ({})  \nState management: {}\n",
            self.application_id(),
            self.architecture,
            self.architecture.description(),
            self.state_management
        ));
        if !self.features.is_empty() {
            out.push_str("\n## Features\n\n");
            for feature in &self.features {
                let route = PresentationTemplate::new(feature.name(), &[]).route();
                out.push_str(&format!("- `{}` at `{route}`\n", feature.name().snake()));
            }
        }
        out.push_str("\n## Getting started\n\n```sh\nflutter pub get\nflutter run\n```\n");
        out
    }

    pub fn render_gitignore(&self) -> String {
        [
            "# Flutter/Dart",
            ".dart_tool/",
            ".flutter-plugins",
            ".flutter-plugins-dependencies",
            ".packages",
            ".pub-cache/",
            ".pub/",
            "build/",
            "",
            "# IDE",
            ".idea/",
            ".vscode/",
            "*.iml",
            "",
            "# OS",
            ".DS_Store",
            "",
        ]
        .join("\n")
    }

    /// Project-relative files: root files first, then each feature.
    ///
    /// # Errors
    ///
    /// Propagates feature errors; paths are checked when features are
    /// placed under their directory.
    pub fn generate(&self) -> Result<FileSet, DomainError> {
        tracing::debug!(
            project = %self.name,
            organization = %self.organization,
            architecture = %self.architecture,
            features = self.features.len(),
            "rendering project"
        );
        let mut files = FileSet::new();
        files.insert("pubspec.yaml", self.render_pubspec());
        files.insert("analysis_options.yaml", self.render_analysis_options());
        files.insert("lib/main.dart", self.render_main());
        files.insert("lib/app.dart", self.render_app());
        files.insert("lib/core/app_config.dart", self.render_app_config());
        files.insert("README.md", self.render_readme());
        files.insert(".gitignore", self.render_gitignore());

        for feature in &self.features {
            let feature = feature.clone().state_management(self.state_management);
            let snake = feature.name().snake();
            files.merge(
                feature
                    .generate()?
                    .prefixed(&self.architecture.feature_base(snake))?,
            );
            if self.include_tests {
                files.merge(
                    feature
                        .generate_tests()
                        .prefixed(&self.architecture.test_base(snake))?,
                );
            }
        }
        Ok(files)
    }
}

fn yaml_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
