//! Placeholder test modules.
//!
//! Bodies are left empty; the case names document the behavior each layer
//! is expected to have. Paths are relative to the feature's test directory.

use crate::domain::file_set::FileSet;
use crate::domain::naming::Identifier;
use crate::domain::templates::state::notifier_class;
use crate::domain::templates::{SourceWriter, dart_string};
use crate::domain::value_objects::StateManagement;

pub const REPOSITORY_TEST_CASES: &[&str] = &[
    "getAll returns remote items and caches them",
    "getAll falls back to cache when remote fails",
    "getById returns cached item without calling remote",
    "getById fetches from remote on cache miss",
    "create caches the saved item",
    "update caches the saved item",
    "delete removes the item from cache",
];

pub const NOTIFIER_TEST_CASES: &[&str] = &[
    "initial state is empty",
    "load emits success with items",
    "load failure keeps previous items",
    "create adds item optimistically",
    "update replaces matching item",
    "delete removes matching item",
    "failed mutation restores previous items",
];

pub const PAGE_TEST_CASES: &[&str] = &[
    "shows progress indicator while loading",
    "renders one card per item",
    "shows error message on failure",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaseKind {
    Unit,
    Widget,
}

fn render(group: &str, cases: &[&str], kind: CaseKind) -> String {
    let mut w = SourceWriter::new();
    w.imports(["package:flutter_test/flutter_test.dart"]);
    w.open("void main() {");
    w.open(format!("group({}, () {{", dart_string(group)));
    for (i, case) in cases.iter().enumerate() {
        if i > 0 {
            w.blank();
        }
        match kind {
            CaseKind::Unit => w.open(format!("test({}, () {{", dart_string(case))),
            CaseKind::Widget => {
                w.open(format!("testWidgets({}, (tester) async {{", dart_string(case)))
            }
        };
        w.line("// Not implemented yet.");
        w.close("});");
    }
    w.close("});");
    w.close("}");
    w.finish()
}

pub fn repository_test_path(base: &Identifier) -> String {
    format!("data/repositories/{}_repository_impl_test.dart", base.snake())
}

pub fn notifier_test_path(base: &Identifier, style: StateManagement) -> String {
    format!(
        "presentation/state/{}_{}_test.dart",
        base.snake(),
        style.file_suffix()
    )
}

pub fn page_test_path(base: &Identifier) -> String {
    format!("presentation/pages/{}_list_page_test.dart", base.snake())
}

/// Test modules for one feature. The repository test is only emitted when
/// the feature has a repository implementation.
pub fn generate(base: &Identifier, style: StateManagement, with_repository: bool) -> FileSet {
    let mut files = FileSet::new();
    if with_repository {
        files.insert(
            repository_test_path(base),
            render(
                &format!("{}RepositoryImpl", base.pascal()),
                REPOSITORY_TEST_CASES,
                CaseKind::Unit,
            ),
        );
    }
    files.insert(
        notifier_test_path(base, style),
        render(&notifier_class(base, style), NOTIFIER_TEST_CASES, CaseKind::Unit),
    );
    files.insert(
        page_test_path(base),
        render(
            &format!("{}ListPage", base.pascal()),
            PAGE_TEST_CASES,
            CaseKind::Widget,
        ),
    );
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> Identifier {
        Identifier::parse("task").unwrap()
    }

    #[test]
    fn emits_three_modules() {
        let files = generate(&task(), StateManagement::Riverpod, true);
        let paths: Vec<_> = files.paths().collect();
        assert_eq!(
            paths,
            [
                "data/repositories/task_repository_impl_test.dart",
                "presentation/state/task_notifier_test.dart",
                "presentation/pages/task_list_page_test.dart",
            ]
        );
    }

    #[test]
    fn every_case_name_is_rendered() {
        let files = generate(&task(), StateManagement::Bloc, true);
        let all: String = files.iter().map(|e| e.content.as_str()).collect();
        for case in REPOSITORY_TEST_CASES
            .iter()
            .chain(NOTIFIER_TEST_CASES)
            .chain(PAGE_TEST_CASES)
        {
            assert!(all.contains(&dart_string(case)), "missing case: {case}");
        }
        assert!(all.contains("group('TaskCubit', () {"));
    }

    #[test]
    fn page_cases_are_widget_tests() {
        let files = generate(&task(), StateManagement::Riverpod, false);
        let page = files.get("presentation/pages/task_list_page_test.dart").unwrap();
        assert_eq!(page.matches("testWidgets(").count(), PAGE_TEST_CASES.len());
        assert_eq!(files.len(), 2);
    }
}
