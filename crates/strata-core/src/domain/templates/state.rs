//! `{Pascal}State` and the mutation notifier.
//!
//! The notifier applies every mutation optimistically to the item list,
//! then confirms it through its backend. On failure it restores the items
//! it had before the mutation and moves to the error status; a failed load
//! keeps whatever items were already shown.

use crate::domain::naming::Identifier;
use crate::domain::templates::usecase::{UseCaseVerb, use_case_class, use_case_var};
use crate::domain::templates::{SourceWriter, paths, relative_import};
use crate::domain::value_objects::StateManagement;

/// What the notifier calls to load and persist items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifierBackend {
    UseCases,
    Repository,
    /// No persistence; mutations only change the in-memory list.
    InMemory,
}

impl NotifierBackend {
    pub const fn select(include_repository: bool, include_use_cases: bool) -> Self {
        if include_use_cases {
            Self::UseCases
        } else if include_repository {
            Self::Repository
        } else {
            Self::InMemory
        }
    }
}

pub fn state_class(base: &Identifier) -> String {
    format!("{}State", base.pascal())
}

pub fn status_enum(base: &Identifier) -> String {
    format!("{}Status", base.pascal())
}

pub fn notifier_class(base: &Identifier, style: StateManagement) -> String {
    format!("{}{}", base.pascal(), style.class_suffix())
}

// ── State ────────────────────────────────────────────────────────────────────

pub fn render_state(base: &Identifier) -> String {
    let state = state_class(base);
    let status = status_enum(base);
    let entity = base.class_name("Entity");
    let path = paths::state(base.snake());
    let mut w = SourceWriter::new();

    w.imports([
        "package:equatable/equatable.dart".to_string(),
        relative_import(&path, &paths::entity(base.snake())),
    ]);

    w.doc(format!("Lifecycle of the {} list.", base.sentence().to_lowercase()));
    w.line(format!("enum {status} {{ initial, loading, success, error }}"));
    w.blank();

    w.doc(format!(
        "Snapshot of the {} list shown by the presentation layer.",
        base.sentence().to_lowercase()
    ));
    w.open(format!("class {state} extends Equatable {{"));
    w.open(format!("const {state}({{"));
    w.line("this.items = const [],");
    w.line(format!("this.status = {status}.initial,"));
    w.line("this.errorMessage,");
    w.close("});");
    w.blank();
    w.line(format!("final List<{entity}> items;"));
    w.line(format!("final {status} status;"));
    w.line("final String? errorMessage;");
    w.blank();
    w.line(format!("bool get isLoading => status == {status}.loading;"));
    w.blank();
    w.open(format!("{state} copyWith({{"));
    w.line(format!("List<{entity}>? items,"));
    w.line(format!("{status}? status,"));
    w.line("String? errorMessage,");
    w.line("bool clearError = false,");
    w.close("}) {");
    w.indent();
    w.open(format!("return {state}("));
    w.line("items: items ?? this.items,");
    w.line("status: status ?? this.status,");
    w.line("errorMessage: clearError ? null : errorMessage ?? this.errorMessage,");
    w.close(");");
    w.close("}");
    w.blank();
    w.line("@override");
    w.line("List<Object?> get props => [items, status, errorMessage];");
    w.close("}");
    w.finish()
}

// ── Notifier ─────────────────────────────────────────────────────────────────

pub fn render_notifier(base: &Identifier, style: StateManagement, backend: NotifierBackend) -> String {
    let state = state_class(base);
    let status = status_enum(base);
    let entity = base.class_name("Entity");
    let repository = base.class_name("Repository");
    let class = notifier_class(base, style);
    let path = paths::notifier(base.snake(), style);
    let emit = |expr: &str| style.assign(expr);
    let mut w = SourceWriter::new();

    let mut imports = vec![
        style.import().to_string(),
        relative_import(&path, &paths::entity(base.snake())),
        relative_import(&path, &paths::state(base.snake())),
    ];
    match backend {
        NotifierBackend::UseCases => imports.extend(
            UseCaseVerb::ALL
                .iter()
                .map(|v| relative_import(&path, &paths::use_case(v.as_str(), base.snake()))),
        ),
        NotifierBackend::Repository => {
            imports.push(relative_import(&path, &paths::repository(base.snake())));
        }
        NotifierBackend::InMemory => {}
    }
    w.imports(imports);

    w.doc(format!(
        "Owns [{state}] and applies list mutations optimistically.\n\nA failed mutation restores the previous items and reports the error."
    ));
    w.open(format!("class {class} extends {} {{", style.base_class(&state)));

    // Constructor
    let super_call = match style {
        StateManagement::Provider => None,
        _ => Some(format!("super(const {state}())")),
    };
    let deps: Vec<(String, String)> = match backend {
        NotifierBackend::UseCases => UseCaseVerb::ALL
            .iter()
            .map(|v| (use_case_class(*v, base), use_case_var(*v, base)))
            .collect(),
        NotifierBackend::Repository => vec![(repository.clone(), "repository".to_string())],
        NotifierBackend::InMemory => Vec::new(),
    };
    if deps.is_empty() {
        match &super_call {
            Some(call) => w.line(format!("{class}() : {call};")),
            None => w.line(format!("{class}();")),
        };
    } else {
        w.open(format!("{class}({{"));
        for (ty, var) in &deps {
            w.line(format!("required {ty} {var},"));
        }
        let mut inits: Vec<String> = deps.iter().map(|(_, var)| format!("_{var} = {var}")).collect();
        inits.extend(super_call);
        // Initializer list aligned under the first entry.
        w.dedent();
        let last = inits.len() - 1;
        for (i, init) in inits.iter().enumerate() {
            let lead = if i == 0 { "})  : " } else { "      " };
            let tail = if i == last { ";" } else { "," };
            w.line(format!("{lead}{init}{tail}"));
        }
        w.blank();
        for (ty, var) in &deps {
            w.line(format!("final {ty} _{var};"));
        }
    }

    if style == StateManagement::Provider {
        w.blank();
        w.line(format!("{state} _state = const {state}();"));
        w.blank();
        w.line(format!("{state} get state => _state;"));
        w.blank();
        w.open(format!("void _emit({state} next) {{"));
        w.line("_state = next;");
        w.line("notifyListeners();");
        w.close("}");
    }

    let call = |op: UseCaseVerb, arg: &str| -> Option<String> {
        match backend {
            NotifierBackend::UseCases => Some(format!("_{}({arg})", use_case_var(op, base))),
            NotifierBackend::Repository => {
                let method = match op {
                    UseCaseVerb::Get => "getAll",
                    UseCaseVerb::Create => "create",
                    UseCaseVerb::Update => "update",
                    UseCaseVerb::Delete => "delete",
                };
                Some(format!("_repository.{method}({arg})"))
            }
            NotifierBackend::InMemory => None,
        }
    };
    let fail = |w: &mut SourceWriter, restore: bool| {
        w.close("} catch (e) {");
        w.indent();
        let items = if restore { "items: previous, " } else { "" };
        w.line(emit(&format!(
            "state.copyWith({items}status: {status}.error, errorMessage: e.toString())"
        )));
        w.close("}");
    };

    // load
    w.blank();
    w.open("Future<void> load() async {");
    match call(UseCaseVerb::Get, "") {
        Some(get) => {
            w.line(emit(&format!(
                "state.copyWith(status: {status}.loading, clearError: true)"
            )));
            w.open("try {");
            w.line(format!("final items = await {get};"));
            w.line(emit(&format!(
                "state.copyWith(items: items, status: {status}.success)"
            )));
            fail(&mut w, false);
        }
        None => {
            w.line(emit(&format!(
                "state.copyWith(status: {status}.success, clearError: true)"
            )));
        }
    }
    w.close("}");

    // create
    w.blank();
    w.open(format!("Future<void> create({entity} entity) async {{"));
    w.line("final previous = state.items;");
    w.line(emit("state.copyWith(items: [...previous, entity], clearError: true)"));
    if let Some(create) = call(UseCaseVerb::Create, "entity") {
        w.open("try {");
        w.line(format!("final saved = await {create};"));
        w.line(emit(&format!(
            "state.copyWith(items: _replace(state.items, saved), status: {status}.success)"
        )));
        fail(&mut w, true);
    }
    w.close("}");

    // update
    w.blank();
    w.open(format!("Future<void> update({entity} entity) async {{"));
    w.line("final previous = state.items;");
    w.line(emit("state.copyWith(items: _replace(previous, entity), clearError: true)"));
    if let Some(update) = call(UseCaseVerb::Update, "entity") {
        w.open("try {");
        w.line(format!("final saved = await {update};"));
        w.line(emit(&format!(
            "state.copyWith(items: _replace(state.items, saved), status: {status}.success)"
        )));
        fail(&mut w, true);
    }
    w.close("}");

    // delete
    w.blank();
    w.open("Future<void> delete(String id) async {");
    w.line("final previous = state.items;");
    w.line(emit(
        "state.copyWith(items: previous.where((item) => item.id != id).toList(), clearError: true)",
    ));
    if let Some(delete) = call(UseCaseVerb::Delete, "id") {
        w.open("try {");
        w.line(format!("await {delete};"));
        w.line(emit(&format!("state.copyWith(status: {status}.success)")));
        fail(&mut w, true);
    }
    w.close("}");

    // helper
    w.blank();
    w.open(format!(
        "List<{entity}> _replace(List<{entity}> items, {entity} next) {{"
    ));
    w.line("return [for (final item in items) item.id == next.id ? next : item];");
    w.close("}");

    w.close("}");
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> Identifier {
        Identifier::parse("task").unwrap()
    }

    #[test]
    fn state_has_status_enum_and_error() {
        let source = render_state(&task());
        assert!(source.contains("enum TaskStatus { initial, loading, success, error }"));
        assert!(source.contains("final List<TaskEntity> items;"));
        assert!(source.contains("final String? errorMessage;"));
        assert!(source.contains("List<Object?> get props => [items, status, errorMessage];"));
    }

    #[test]
    fn riverpod_notifier_uses_use_cases() {
        let source = render_notifier(&task(), StateManagement::Riverpod, NotifierBackend::UseCases);
        assert!(source.contains("class TaskNotifier extends StateNotifier<TaskState> {"));
        assert!(source.contains("required GetTaskUseCase getTask,"));
        assert!(source.contains("})  : _getTask = getTask,"));
        assert!(source.contains("        super(const TaskState());"));
        assert!(source.contains("super(const TaskState());"));
        assert!(source.contains("final items = await _getTask();"));
        assert!(source.contains("import '../../domain/usecases/delete_task_usecase.dart';"));
    }

    #[test]
    fn failed_mutations_restore_previous_items() {
        let source = render_notifier(&task(), StateManagement::Bloc, NotifierBackend::Repository);
        assert!(source.contains("class TaskCubit extends Cubit<TaskState> {"));
        assert_eq!(
            source
                .matches("emit(state.copyWith(items: previous, status: TaskStatus.error, errorMessage: e.toString()));")
                .count(),
            3
        );
        // A failed load keeps the items it had.
        assert!(source.contains(
            "emit(state.copyWith(status: TaskStatus.error, errorMessage: e.toString()));"
        ));
    }

    #[test]
    fn provider_controller_notifies_listeners() {
        let source = render_notifier(&task(), StateManagement::Provider, NotifierBackend::InMemory);
        assert!(source.contains("class TaskController extends ChangeNotifier {"));
        assert!(source.contains("TaskController();"));
        assert!(source.contains("notifyListeners();"));
        assert!(source.contains("_emit(state.copyWith(items: [...previous, entity], clearError: true));"));
        assert!(!source.contains("try {"));
    }

    #[test]
    fn backend_selection() {
        assert_eq!(NotifierBackend::select(true, true), NotifierBackend::UseCases);
        assert_eq!(NotifierBackend::select(false, true), NotifierBackend::UseCases);
        assert_eq!(NotifierBackend::select(true, false), NotifierBackend::Repository);
        assert_eq!(NotifierBackend::select(false, false), NotifierBackend::InMemory);
    }
}
