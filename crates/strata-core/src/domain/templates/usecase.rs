//! Single-operation use cases.
//!
//! Each use case holds exactly one repository and exposes exactly one
//! `call` method, so it can be injected and faked on its own.

use crate::domain::file_set::FileSet;
use crate::domain::naming::Identifier;
use crate::domain::templates::{SourceWriter, paths, relative_import};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseCaseVerb {
    Get,
    Create,
    Update,
    Delete,
}

impl UseCaseVerb {
    pub const ALL: [UseCaseVerb; 4] = [Self::Get, Self::Create, Self::Update, Self::Delete];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    pub const fn pascal(self) -> &'static str {
        match self {
            Self::Get => "Get",
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
        }
    }

    /// `(return type, parameters, repository call)` with `{E}` for the entity.
    const fn shape(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::Get => ("Future<List<{E}>>", "", "getAll()"),
            Self::Create => ("Future<{E}>", "{E} entity", "create(entity)"),
            Self::Update => ("Future<{E}>", "{E} entity", "update(entity)"),
            Self::Delete => ("Future<void>", "String id", "delete(id)"),
        }
    }

    const fn summary(self) -> &'static str {
        match self {
            Self::Get => "Loads every",
            Self::Create => "Stores a new",
            Self::Update => "Saves changes to an existing",
            Self::Delete => "Removes one",
        }
    }
}

/// Names shared by the use case file and the notifier that injects it.
pub fn use_case_class(verb: UseCaseVerb, base: &Identifier) -> String {
    format!("{}{}UseCase", verb.pascal(), base.pascal())
}

/// Dependency field name in notifiers, e.g. `getTask`.
pub fn use_case_var(verb: UseCaseVerb, base: &Identifier) -> String {
    format!("{}{}", verb.as_str(), base.pascal())
}

pub fn render(verb: UseCaseVerb, base: &Identifier) -> String {
    let entity = base.class_name("Entity");
    let repository = base.class_name("Repository");
    let class = use_case_class(verb, base);
    let path = paths::use_case(verb.as_str(), base.snake());
    let (ret, params, call) = verb.shape();
    let mut w = SourceWriter::new();

    w.imports([
        relative_import(&path, &paths::entity(base.snake())),
        relative_import(&path, &paths::repository(base.snake())),
    ]);
    w.doc(format!(
        "{} {}.",
        verb.summary(),
        base.sentence().to_lowercase()
    ));
    w.open(format!("class {class} {{"));
    w.line(format!("const {class}(this._repository);"));
    w.blank();
    w.line(format!("final {repository} _repository;"));
    w.blank();
    w.line(format!(
        "{} call({}) => _repository.{call};",
        ret.replace("{E}", &entity),
        params.replace("{E}", &entity)
    ));
    w.close("}");
    w.finish()
}

/// The four use case modules.
pub fn generate(base: &Identifier) -> FileSet {
    UseCaseVerb::ALL
        .into_iter()
        .map(|verb| (paths::use_case(verb.as_str(), base.snake()), render(verb, base)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> Identifier {
        Identifier::parse("task").unwrap()
    }

    #[test]
    fn emits_four_use_cases() {
        let files = generate(&task());
        let paths: Vec<_> = files.paths().collect();
        assert_eq!(
            paths,
            [
                "domain/usecases/get_task_usecase.dart",
                "domain/usecases/create_task_usecase.dart",
                "domain/usecases/update_task_usecase.dart",
                "domain/usecases/delete_task_usecase.dart",
            ]
        );
    }

    #[test]
    fn each_has_one_repository_and_one_call() {
        for verb in UseCaseVerb::ALL {
            let source = render(verb, &task());
            assert_eq!(source.matches("final TaskRepository _repository;").count(), 1);
            assert_eq!(source.matches(" call(").count(), 1);
        }
    }

    #[test]
    fn delete_takes_an_id() {
        let source = render(UseCaseVerb::Delete, &task());
        assert!(source.contains("Future<void> call(String id) => _repository.delete(id);"));
        assert!(source.contains("import '../repositories/task_repository.dart';"));
    }

    #[test]
    fn injection_names() {
        assert_eq!(use_case_class(UseCaseVerb::Get, &task()), "GetTaskUseCase");
        assert_eq!(use_case_var(UseCaseVerb::Create, &task()), "createTask");
    }
}
