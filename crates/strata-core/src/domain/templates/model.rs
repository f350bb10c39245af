//! `{Pascal}Model`: the serializable data model.
//!
//! Sections are rendered in a fixed order:
//!
//! 1. doc comment
//! 2. class header and constructor, one parameter per field in input order
//! 3. field declarations
//! 4. `fromJson` / `toJson` when the wire codec is enabled
//! 5. `fromEntity` / `toEntity` when linked to an entity
//! 6. `copyWith`
//! 7. equality: `props` for [`ModelStyle::ValueType`], hand-written
//!    `==` / `hashCode` / `toString` for [`ModelStyle::PlainClass`]

use crate::domain::error::DomainError;
use crate::domain::field_spec::{FieldSpec, ensure_unique};
use crate::domain::file_set::FileSet;
use crate::domain::naming::Identifier;
use crate::domain::templates::{SourceWriter, dart_string, paths, relative_import};
use crate::domain::value_objects::ModelStyle;

/// The entity a model converts to and from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityLink {
    pub class: String,
    /// Path of the entity file, relative to the same root as the model.
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct ModelTemplate {
    base: Identifier,
    fields: Vec<FieldSpec>,
    style: ModelStyle,
    wire_codec: bool,
    entity: Option<EntityLink>,
}

impl ModelTemplate {
    /// Build a model template. `fields` may be empty.
    ///
    /// # Errors
    ///
    /// `DuplicateField` when two fields share a name.
    pub fn new(
        name: &Identifier,
        fields: Vec<FieldSpec>,
        style: ModelStyle,
        wire_codec: bool,
    ) -> Result<Self, DomainError> {
        let base = name.without_suffix("Model");
        ensure_unique(&fields, &base.class_name("Model"))?;
        Ok(Self {
            base,
            fields,
            style,
            wire_codec,
            entity: None,
        })
    }

    /// Add `fromEntity` / `toEntity` conversions. The entity must have the
    /// same fields as the model.
    #[must_use]
    pub fn linked_to(mut self, entity: EntityLink) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn class_name(&self) -> String {
        self.base.class_name("Model")
    }

    pub fn path(&self) -> String {
        paths::model(self.base.snake())
    }

    pub fn render(&self) -> String {
        let class = self.class_name();
        let mut w = SourceWriter::new();

        let mut imports = Vec::new();
        if self.style == ModelStyle::ValueType {
            imports.push("package:equatable/equatable.dart".to_string());
        }
        if let Some(entity) = &self.entity {
            imports.push(relative_import(&self.path(), &entity.path));
        }
        w.imports(imports);

        // 1. doc
        let mut doc = format!("{} data model.", self.base.sentence());
        if let Some(entity) = &self.entity {
            doc.push_str(&format!("\n\nWire representation of [{}].", entity.class));
        }
        w.doc(doc);

        // 2. header + constructor
        match self.style {
            ModelStyle::ValueType => w.open(format!("class {class} extends Equatable {{")),
            ModelStyle::PlainClass => w.open(format!("class {class} {{")),
        };
        if self.fields.is_empty() {
            w.line(format!("const {class}();"));
        } else {
            w.open(format!("const {class}({{"));
            w.lines(self.fields.iter().map(FieldSpec::constructor_param));
            w.close("});");
        }
        w.blank();

        // 3. fields
        for field in &self.fields {
            w.lines(field.declaration());
        }
        w.blank();

        // 4. wire codec
        if self.wire_codec {
            self.render_codec(&mut w, &class);
        }

        // 5. entity conversion
        if let Some(entity) = &self.entity {
            self.render_conversion(&mut w, &class, &entity.class);
        }

        // 6. copyWith
        self.render_copy_with(&mut w, &class);

        // 7. equality
        match self.style {
            ModelStyle::ValueType => self.render_props(&mut w),
            ModelStyle::PlainClass => self.render_operators(&mut w, &class),
        }
        w.close("}");

        w.finish()
    }

    fn render_codec(&self, w: &mut SourceWriter, class: &str) {
        w.open(format!(
            "factory {class}.fromJson(Map<String, dynamic> json) {{"
        ));
        self.construct(w, class, |f| f.decode_expr("json"));
        w.close("}");
        w.blank();

        w.open("Map<String, dynamic> toJson() {");
        if self.fields.is_empty() {
            w.line("return <String, dynamic>{};");
        } else {
            w.open("return <String, dynamic>{");
            for field in &self.fields {
                w.line(format!("{}: {},", dart_string(&field.wire_key()), field.encode_expr()));
            }
            w.close("};");
        }
        w.close("}");
        w.blank();
    }

    fn render_conversion(&self, w: &mut SourceWriter, class: &str, entity: &str) {
        w.open(format!("factory {class}.fromEntity({entity} entity) {{"));
        self.construct(w, class, |f| format!("entity.{}", f.var_name()));
        w.close("}");
        w.blank();

        w.open(format!("{entity} toEntity() {{"));
        self.construct(w, entity, FieldSpec::var_name);
        w.close("}");
        w.blank();
    }

    fn render_copy_with(&self, w: &mut SourceWriter, class: &str) {
        if self.fields.is_empty() {
            w.line(format!("{class} copyWith() => const {class}();"));
            w.blank();
            return;
        }
        w.open(format!("{class} copyWith({{"));
        w.lines(self.fields.iter().map(FieldSpec::copy_with_param));
        w.close("}) {");
        w.indent();
        w.open(format!("return {class}("));
        w.lines(self.fields.iter().map(FieldSpec::copy_with_assignment));
        w.close(");");
        w.close("}");
        w.blank();
    }

    fn render_props(&self, w: &mut SourceWriter) {
        w.line("@override");
        w.line(format!("List<Object?> get props => [{}];", self.equality_tuple()));
    }

    fn render_operators(&self, w: &mut SourceWriter, class: &str) {
        w.line("@override");
        w.open("bool operator ==(Object other) {");
        w.line("if (identical(this, other)) return true;");
        if self.fields.is_empty() {
            w.line(format!("return other is {class};"));
        } else {
            let checks: Vec<String> = self
                .fields
                .iter()
                .map(|f| format!("other.{0} == {0}", f.var_name()))
                .collect();
            w.line(format!("return other is {class} && {};", checks.join(" && ")));
        }
        w.close("}");
        w.blank();

        w.line("@override");
        w.line(format!(
            "int get hashCode => Object.hashAll(<Object?>[{}]);",
            self.equality_tuple()
        ));
        w.blank();

        let entries: Vec<String> = self.fields.iter().map(FieldSpec::to_string_entry).collect();
        w.line("@override");
        w.line(format!("String toString() => '{class}({})';", entries.join(", ")));
    }

    /// `return Class(field: expr, ...);` with one argument per field.
    fn construct(&self, w: &mut SourceWriter, class: &str, expr: impl Fn(&FieldSpec) -> String) {
        if self.fields.is_empty() {
            w.line(format!("return const {class}();"));
            return;
        }
        w.open(format!("return {class}("));
        for field in &self.fields {
            w.line(format!("{}: {},", field.var_name(), expr(field)));
        }
        w.close(");");
    }

    fn equality_tuple(&self) -> String {
        self.fields
            .iter()
            .map(FieldSpec::equality_entry)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn generate(&self) -> FileSet {
        tracing::debug!(model = %self.class_name(), style = %self.style, "rendering model");
        let mut files = FileSet::new();
        files.insert(self.path(), self.render());
        files
    }
}
