//! Page and widget skeletons.
//!
//! These are wired to the state and entity classes by name only; there is
//! no navigation logic beyond a `routeName` constant per page.

use crate::domain::field_spec::FieldSpec;
use crate::domain::file_set::FileSet;
use crate::domain::naming::{Identifier, pluralize, to_sentence_case};
use crate::domain::templates::state::{state_class, status_enum};
use crate::domain::templates::{SourceWriter, dart_string, paths, relative_import};

const MATERIAL: &str = "package:flutter/material.dart";

/// Renders the five presentation modules of one feature.
#[derive(Debug, Clone)]
pub struct PresentationTemplate<'a> {
    base: &'a Identifier,
    fields: &'a [FieldSpec],
}

impl<'a> PresentationTemplate<'a> {
    /// `fields` are the entity's fields; they pick the card title and the
    /// form's text inputs.
    pub fn new(base: &'a Identifier, fields: &'a [FieldSpec]) -> Self {
        Self { base, fields }
    }

    fn entity(&self) -> String {
        self.base.class_name("Entity")
    }

    fn plural_title(&self) -> String {
        pluralize(&self.base.sentence())
    }

    /// `/tasks`, `/user_profiles`.
    pub fn route(&self) -> String {
        format!("/{}", pluralize(self.base.snake()))
    }

    /// First required `String` field other than `id`, else `id`.
    fn title_field(&self) -> String {
        self.fields
            .iter()
            .find(|f| f.base_type() == "String" && !f.is_nullable() && f.var_name() != "id")
            .map_or_else(|| "id".to_string(), FieldSpec::var_name)
    }

    /// `String` fields the form edits.
    fn text_fields(&self) -> Vec<&FieldSpec> {
        self.fields
            .iter()
            .filter(|f| f.base_type() == "String" && f.var_name() != "id")
            .collect()
    }

    pub fn render_list_page(&self) -> String {
        let p = self.base.pascal();
        let state = state_class(self.base);
        let status = status_enum(self.base);
        let path = paths::list_page(self.base.snake());
        let mut w = SourceWriter::new();

        w.imports([
            MATERIAL.to_string(),
            relative_import(&path, &paths::state(self.base.snake())),
            relative_import(&path, &paths::list_widget(self.base.snake())),
        ]);
        w.doc(format!(
            "Lists every {}.\n\nRender it with the current [{state}] from the feature's notifier.",
            self.base.sentence().to_lowercase()
        ));
        w.open(format!("class {p}ListPage extends StatelessWidget {{"));
        w.line(format!(
            "const {p}ListPage({{super.key, this.state = const {state}()}});"
        ));
        w.blank();
        w.line(format!("static const routeName = {};", dart_string(&self.route())));
        w.blank();
        w.line(format!("final {state} state;"));
        w.blank();
        w.line("@override");
        w.open("Widget build(BuildContext context) {");
        w.open("return Scaffold(");
        w.line(format!(
            "appBar: AppBar(title: const Text({})),",
            dart_string(&self.plural_title())
        ));
        w.line("body: _buildBody(),");
        w.close(");");
        w.close("}");
        w.blank();
        w.open("Widget _buildBody() {");
        w.open(format!(
            "if (state.status == {status}.loading && state.items.isEmpty) {{"
        ));
        w.line("return const Center(child: CircularProgressIndicator());");
        w.close("}");
        w.open(format!(
            "if (state.status == {status}.error && state.items.isEmpty) {{"
        ));
        w.line("return Center(child: Text(state.errorMessage ?? 'Something went wrong'));");
        w.close("}");
        w.line(format!("return {p}ListWidget(items: state.items);"));
        w.close("}");
        w.close("}");
        w.finish()
    }

    pub fn render_detail_page(&self) -> String {
        let p = self.base.pascal();
        let entity = self.entity();
        let path = paths::detail_page(self.base.snake());
        let mut w = SourceWriter::new();

        w.imports([
            MATERIAL.to_string(),
            relative_import(&path, &paths::entity(self.base.snake())),
            relative_import(&path, &paths::card(self.base.snake())),
        ]);
        w.doc(format!("Shows a single {}.", self.base.sentence().to_lowercase()));
        w.open(format!("class {p}DetailPage extends StatelessWidget {{"));
        w.line(format!("const {p}DetailPage({{super.key, required this.item}});"));
        w.blank();
        w.line(format!(
            "static const routeName = {};",
            dart_string(&format!("{}/detail", self.route()))
        ));
        w.blank();
        w.line(format!("final {entity} item;"));
        w.blank();
        w.line("@override");
        w.open("Widget build(BuildContext context) {");
        w.open("return Scaffold(");
        w.line(format!(
            "appBar: AppBar(title: const Text({})),",
            dart_string(&self.base.sentence())
        ));
        w.open("body: Padding(");
        w.line("padding: const EdgeInsets.all(16),");
        w.line(format!("child: {p}Card(item: item),"));
        w.close("),");
        w.close(");");
        w.close("}");
        w.close("}");
        w.finish()
    }

    pub fn render_card(&self) -> String {
        let p = self.base.pascal();
        let entity = self.entity();
        let path = paths::card(self.base.snake());
        let title = self.title_field();
        let mut w = SourceWriter::new();

        w.imports([
            MATERIAL.to_string(),
            relative_import(&path, &paths::entity(self.base.snake())),
        ]);
        w.doc(format!("Compact summary of one {}.", self.base.sentence().to_lowercase()));
        w.open(format!("class {p}Card extends StatelessWidget {{"));
        w.line(format!("const {p}Card({{super.key, required this.item, this.onTap}});"));
        w.blank();
        w.line(format!("final {entity} item;"));
        w.line("final VoidCallback? onTap;");
        w.blank();
        w.line("@override");
        w.open("Widget build(BuildContext context) {");
        w.open("return Card(");
        w.open("child: ListTile(");
        w.line(format!("title: Text(item.{title}),"));
        if title != "id" {
            w.line("subtitle: Text(item.id),");
        }
        w.line("onTap: onTap,");
        w.close("),");
        w.close(");");
        w.close("}");
        w.close("}");
        w.finish()
    }

    pub fn render_list_widget(&self) -> String {
        let p = self.base.pascal();
        let entity = self.entity();
        let path = paths::list_widget(self.base.snake());
        let mut w = SourceWriter::new();

        w.imports([
            MATERIAL.to_string(),
            relative_import(&path, &paths::entity(self.base.snake())),
            relative_import(&path, &paths::card(self.base.snake())),
        ]);
        w.doc(format!(
            "Scrollable list of [{p}Card]s, one per {}.",
            self.base.sentence().to_lowercase()
        ));
        w.open(format!("class {p}ListWidget extends StatelessWidget {{"));
        w.line(format!(
            "const {p}ListWidget({{super.key, required this.items, this.onSelected}});"
        ));
        w.blank();
        w.line(format!("final List<{entity}> items;"));
        w.line(format!("final ValueChanged<{entity}>? onSelected;"));
        w.blank();
        w.line("@override");
        w.open("Widget build(BuildContext context) {");
        w.open("if (items.isEmpty) {");
        w.line(format!(
            "return const Center(child: Text({}));",
            dart_string(&format!("No {} yet", self.plural_title().to_lowercase()))
        ));
        w.close("}");
        w.open("return ListView.builder(");
        w.line("itemCount: items.length,");
        w.open("itemBuilder: (context, index) {");
        w.line("final item = items[index];");
        w.line("final select = onSelected;");
        w.line(format!(
            "return {p}Card(item: item, onTap: select == null ? null : () => select(item));"
        ));
        w.close("},");
        w.close(");");
        w.close("}");
        w.close("}");
        w.finish()
    }

    pub fn render_form(&self) -> String {
        let p = self.base.pascal();
        let entity = self.entity();
        let path = paths::form(self.base.snake());
        let inputs = self.text_fields();
        let mut w = SourceWriter::new();

        w.imports([
            MATERIAL.to_string(),
            relative_import(&path, &paths::entity(self.base.snake())),
        ]);
        w.doc(format!(
            "Edits the text fields of an existing {}.",
            self.base.sentence().to_lowercase()
        ));
        w.open(format!("class {p}Form extends StatefulWidget {{"));
        w.line(format!(
            "const {p}Form({{super.key, required this.initial, required this.onSubmit}});"
        ));
        w.blank();
        w.line(format!("final {entity} initial;"));
        w.line(format!("final ValueChanged<{entity}> onSubmit;"));
        w.blank();
        w.line("@override");
        w.line(format!("State<{p}Form> createState() => _{p}FormState();"));
        w.close("}");
        w.blank();

        w.open(format!("class _{p}FormState extends State<{p}Form> {{"));
        w.line("final _formKey = GlobalKey<FormState>();");
        for f in &inputs {
            w.line(format!("late final TextEditingController _{}Controller;", f.var_name()));
        }
        w.blank();
        w.line("@override");
        w.open("void initState() {");
        w.line("super.initState();");
        for f in &inputs {
            let var = f.var_name();
            let text = if f.is_nullable() {
                format!("widget.initial.{var} ?? ''")
            } else {
                format!("widget.initial.{var}")
            };
            w.line(format!("_{var}Controller = TextEditingController(text: {text});"));
        }
        w.close("}");
        w.blank();
        w.line("@override");
        w.open("void dispose() {");
        for f in &inputs {
            w.line(format!("_{}Controller.dispose();", f.var_name()));
        }
        w.line("super.dispose();");
        w.close("}");
        w.blank();

        w.open("void _submit() {");
        w.line("if (!(_formKey.currentState?.validate() ?? false)) return;");
        if inputs.is_empty() {
            w.line("widget.onSubmit(widget.initial);");
        } else {
            w.open("widget.onSubmit(widget.initial.copyWith(");
            for f in &inputs {
                let var = f.var_name();
                w.line(format!("{var}: _{var}Controller.text,"));
            }
            w.close("));");
        }
        w.close("}");
        w.blank();

        w.line("@override");
        w.open("Widget build(BuildContext context) {");
        w.open("return Form(");
        w.line("key: _formKey,");
        w.open("child: Column(");
        w.open("children: [");
        for f in &inputs {
            let var = f.var_name();
            w.open("TextFormField(");
            w.line(format!("controller: _{var}Controller,"));
            w.line(format!(
                "decoration: const InputDecoration(labelText: {}),",
                dart_string(&to_sentence_case(&f.name().pascal()))
            ));
            if !f.is_nullable() {
                w.line("validator: (value) => value == null || value.isEmpty ? 'Required' : null,");
            }
            w.close("),");
        }
        w.line("const SizedBox(height: 16),");
        w.line("ElevatedButton(onPressed: _submit, child: const Text('Save')),");
        w.close("],");
        w.close("),");
        w.close(");");
        w.close("}");
        w.close("}");
        w.finish()
    }

    pub fn generate(&self) -> FileSet {
        let s = self.base.snake();
        let mut files = FileSet::new();
        files.insert(paths::list_page(s), self.render_list_page());
        files.insert(paths::detail_page(s), self.render_detail_page());
        files.insert(paths::card(s), self.render_card());
        files.insert(paths::list_widget(s), self.render_list_widget());
        files.insert(paths::form(s), self.render_form());
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::field_spec::default_entity_fields;

    fn with_defaults<T>(f: impl FnOnce(PresentationTemplate<'_>) -> T) -> T {
        let base = Identifier::parse("task").unwrap();
        let fields = default_entity_fields();
        f(PresentationTemplate::new(&base, &fields))
    }

    #[test]
    fn emits_five_modules() {
        let files = with_defaults(|t| t.generate());
        assert_eq!(files.len(), 5);
        assert!(files.contains("presentation/pages/task_list_page.dart"));
        assert!(files.contains("presentation/widgets/task_list_widget.dart"));
    }

    #[test]
    fn list_page_is_wired_to_state() {
        let source = with_defaults(|t| t.render_list_page());
        assert!(source.contains("const TaskListPage({super.key, this.state = const TaskState()});"));
        assert!(source.contains("static const routeName = '/tasks';"));
        assert!(source.contains("CircularProgressIndicator"));
        assert!(source.contains("return TaskListWidget(items: state.items);"));
    }

    #[test]
    fn card_titles_with_first_string_field() {
        let source = with_defaults(|t| t.render_card());
        assert!(source.contains("title: Text(item.name),"));
        assert!(source.contains("subtitle: Text(item.id),"));
    }

    #[test]
    fn form_edits_string_fields() {
        let source = with_defaults(|t| t.render_form());
        assert!(source.contains("late final TextEditingController _nameController;"));
        assert!(source.contains("name: _nameController.text,"));
        assert!(!source.contains("_idController"));
        assert!(!source.contains("_createdAtController"));
    }

    #[test]
    fn form_without_text_fields_submits_initial() {
        let base = Identifier::parse("counter").unwrap();
        let fields = vec![FieldSpec::parse("id:String").unwrap()];
        let source = PresentationTemplate::new(&base, &fields).render_form();
        assert!(source.contains("widget.onSubmit(widget.initial);"));
    }

    #[test]
    fn plural_routes() {
        let base = Identifier::parse("category").unwrap();
        let t = PresentationTemplate::new(&base, &[]);
        assert_eq!(t.route(), "/categories");
    }
}
