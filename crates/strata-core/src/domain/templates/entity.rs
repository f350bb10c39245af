//! `{Pascal}Entity`: the domain object with identity, copy semantics and equality.

use crate::domain::error::DomainError;
use crate::domain::field_spec::{FieldSpec, default_entity_fields, ensure_unique, with_id_field};
use crate::domain::file_set::FileSet;
use crate::domain::naming::Identifier;
use crate::domain::templates::{SourceWriter, paths};

#[derive(Debug, Clone)]
pub struct EntityTemplate {
    base: Identifier,
    fields: Vec<FieldSpec>,
}

impl EntityTemplate {
    /// Build an entity template.
    ///
    /// With no fields the entity carries `id`, `name`, `createdAt` and
    /// `updatedAt`. Otherwise `id:String` is prepended when absent.
    ///
    /// # Errors
    ///
    /// `DuplicateField` when two fields share a name, `InvalidRequest` when
    /// a given `id` field is not a `String`.
    pub fn new(name: &Identifier, fields: Vec<FieldSpec>) -> Result<Self, DomainError> {
        let base = name.without_suffix("Entity");
        let fields = if fields.is_empty() {
            default_entity_fields()
        } else {
            with_id_field(fields)?
        };
        ensure_unique(&fields, &base.class_name("Entity"))?;
        Ok(Self { base, fields })
    }

    /// Name without the `Entity` suffix.
    pub fn base(&self) -> &Identifier {
        &self.base
    }

    pub fn class_name(&self) -> String {
        self.base.class_name("Entity")
    }

    pub fn path(&self) -> String {
        paths::entity(self.base.snake())
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn render(&self) -> String {
        let class = self.class_name();
        let mut w = SourceWriter::new();

        w.imports(["package:equatable/equatable.dart"]);
        w.doc(format!(
            "{} entity.\n\nCore business object; identity is its `id`.",
            self.base.sentence()
        ));
        w.open(format!("class {class} extends Equatable {{"));

        w.open(format!("const {class}({{"));
        w.lines(self.fields.iter().map(FieldSpec::constructor_param));
        w.close("});");
        w.blank();

        for field in &self.fields {
            w.lines(field.declaration());
        }
        w.blank();

        w.open(format!("{class} copyWith({{"));
        w.lines(self.fields.iter().map(FieldSpec::copy_with_param));
        w.close("}) {");
        w.indent();
        w.open(format!("return {class}("));
        w.lines(self.fields.iter().map(FieldSpec::copy_with_assignment));
        w.close(");");
        w.close("}");
        w.blank();

        let props: Vec<String> = self.fields.iter().map(FieldSpec::equality_entry).collect();
        w.line("@override");
        w.line(format!("List<Object?> get props => [{}];", props.join(", ")));
        w.blank();
        w.line("@override");
        w.line("bool get stringify => true;");
        w.close("}");

        w.finish()
    }

    pub fn generate(&self) -> FileSet {
        tracing::debug!(entity = %self.class_name(), "rendering entity");
        let mut files = FileSet::new();
        files.insert(self.path(), self.render());
        files
    }
}
