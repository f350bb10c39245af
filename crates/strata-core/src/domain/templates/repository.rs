//! Repository interface, implementation and data sources.
//!
//! The implementation body of each method is chosen by the method's
//! [`Coordination`] and by which data sources are present:
//!
//! | method | remote + local | remote only | local only | neither |
//! |---|---|---|---|---|
//! | getAll | remote, cache result; on failure read cache | remote | local | stub |
//! | getById | cache first, then remote (cached if found) | remote | local | stub |
//! | create / update | remote, cache returned value | remote | cache input, return it | stub |
//! | delete | remote, then evict | remote | evict | stub |
//! | search / count / getPaginated | remote | remote | local | stub |
//! | exists | `getById(id) != null` | same | same | same |
//! | getByIds | sequential `getById`, non-null kept in order | same | same | same |
//! | deleteAll | remote `deleteAll`, local `clearAll` | remote | local | stub |
//! | createMany | sequential `create`, results in order | same | same | same |
//! | custom | stub | stub | stub | stub |
//!
//! A "stub" body throws `UnimplementedError`. Methods that call back into
//! the repository (`exists`, `getByIds`, `createMany`) use a private
//! `_getById` / `_create` helper when that method was not itself requested,
//! so the public surface is exactly the requested list.

use crate::domain::file_set::FileSet;
use crate::domain::method_catalog::{CatalogMethod, Coordination, MethodDef, RepositoryMethod};
use crate::domain::naming::Identifier;
use crate::domain::templates::{SourceWriter, paths, relative_import, unimplemented};

// ── Data source presence ─────────────────────────────────────────────────────

/// Which data sources the implementation coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSources {
    pub remote: bool,
    pub local: bool,
}

impl DataSources {
    pub const BOTH: Self = Self {
        remote: true,
        local: true,
    };

    pub const fn new(remote: bool, local: bool) -> Self {
        Self { remote, local }
    }

    pub const fn none(self) -> bool {
        !self.remote && !self.local
    }
}

// ── Local store operations ───────────────────────────────────────────────────

/// Operations of the local data source, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum LocalOp {
    GetAll,
    CacheAll,
    GetById,
    Cache,
    Remove,
    Search,
    Count,
    GetPaginated,
    ClearAll,
}

impl LocalOp {
    fn signature(self, entity: &str) -> String {
        match self {
            Self::GetAll => format!("Future<List<{entity}>> getAll()"),
            Self::CacheAll => format!("Future<void> cacheAll(List<{entity}> entities)"),
            Self::GetById => format!("Future<{entity}?> getById(String id)"),
            Self::Cache => format!("Future<void> cache({entity} entity)"),
            Self::Remove => "Future<void> remove(String id)".to_string(),
            Self::Search => format!("Future<List<{entity}>> search(String query)"),
            Self::Count => "Future<int> count()".to_string(),
            Self::GetPaginated => {
                format!("Future<List<{entity}>> getPaginated({{int page = 1, int pageSize = 20}})")
            }
            Self::ClearAll => "Future<void> clearAll()".to_string(),
        }
    }

    /// In-memory implementation over `_store`.
    fn body(self) -> &'static [&'static str] {
        match self {
            Self::GetAll => &["return _store.values.toList();"],
            Self::CacheAll => &[
                "_store",
                "  ..clear()",
                "  ..addEntries(entities.map((e) => MapEntry(e.id, e)));",
            ],
            Self::GetById => &["return _store[id];"],
            Self::Cache => &["_store[entity.id] = entity;"],
            Self::Remove => &["_store.remove(id);"],
            Self::Search => &[
                "final needle = query.toLowerCase();",
                "return _store.values",
                "    .where((e) => e.toString().toLowerCase().contains(needle))",
                "    .toList();",
            ],
            Self::Count => &["return _store.length;"],
            Self::GetPaginated => &[
                "final offset = (page < 1 ? 0 : page - 1) * pageSize;",
                "return _store.values.skip(offset).take(pageSize).toList();",
            ],
            Self::ClearAll => &["_store.clear();"],
        }
    }
}

// ── Template ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RepositoryTemplate {
    base: Identifier,
    entity: Identifier,
    methods: Vec<RepositoryMethod>,
    sources: DataSources,
}

impl RepositoryTemplate {
    /// `methods` must already be resolved (see
    /// [`resolve_methods`](crate::domain::method_catalog::resolve_methods)).
    /// `entity` defaults to the repository name without a trailing `Entity`.
    pub fn new(
        name: &Identifier,
        entity: Option<&Identifier>,
        methods: Vec<RepositoryMethod>,
        sources: DataSources,
    ) -> Self {
        let base = name.without_suffix("RepositoryImpl").without_suffix("Repository");
        let entity = entity
            .map(|e| e.without_suffix("Entity"))
            .unwrap_or_else(|| base.without_suffix("Entity"));
        Self {
            base,
            entity,
            methods,
            sources,
        }
    }

    // ── Names ────────────────────────────────────────────────────────────

    pub fn interface_name(&self) -> String {
        self.base.class_name("Repository")
    }

    pub fn impl_name(&self) -> String {
        format!("{}Impl", self.interface_name())
    }

    fn entity_class(&self) -> String {
        self.entity.class_name("Entity")
    }

    fn remote_name(&self) -> String {
        format!("{}RemoteDataSource", self.base.pascal())
    }

    fn local_name(&self) -> String {
        format!("{}LocalDataSource", self.base.pascal())
    }

    fn entity_path(&self) -> String {
        paths::entity(self.entity.snake())
    }

    pub fn interface_path(&self) -> String {
        paths::repository(self.base.snake())
    }

    pub fn impl_path(&self) -> String {
        paths::repository_impl(self.base.snake())
    }

    pub fn remote_path(&self) -> String {
        paths::remote_data_source(self.base.snake())
    }

    pub fn local_path(&self) -> String {
        paths::local_data_source(self.base.snake())
    }

    pub fn methods(&self) -> &[RepositoryMethod] {
        &self.methods
    }

    // ── Method sets ──────────────────────────────────────────────────────

    fn requested(&self, method: CatalogMethod) -> bool {
        self.methods.contains(&RepositoryMethod::Catalog(method))
    }

    /// Helpers needed by requested methods but not requested themselves.
    fn hidden_helpers(&self) -> Vec<CatalogMethod> {
        let mut helpers = Vec::new();
        for method in &self.methods {
            let RepositoryMethod::Catalog(m) = method else {
                continue;
            };
            if let Some(dep) = m.def().depends_on() {
                if !self.requested(dep) && !helpers.contains(&dep) {
                    helpers.push(dep);
                }
            }
        }
        helpers
    }

    /// Every catalog method with a body in the implementation, catalog order.
    fn effective(&self) -> Vec<CatalogMethod> {
        let helpers = self.hidden_helpers();
        CatalogMethod::all()
            .filter(|m| self.requested(*m) || helpers.contains(m))
            .collect()
    }

    fn remote_methods(&self) -> Vec<&'static MethodDef> {
        self.effective()
            .into_iter()
            .map(CatalogMethod::def)
            .filter(|d| d.remote)
            .collect()
    }

    fn local_ops(&self) -> Vec<LocalOp> {
        let remote = self.sources.remote;
        let mut ops = Vec::new();
        for method in self.effective() {
            match method {
                CatalogMethod::GetAll if remote => ops.extend([LocalOp::GetAll, LocalOp::CacheAll]),
                CatalogMethod::GetAll => ops.push(LocalOp::GetAll),
                CatalogMethod::GetById if remote => {
                    ops.extend([LocalOp::GetById, LocalOp::Cache]);
                }
                CatalogMethod::GetById => ops.push(LocalOp::GetById),
                CatalogMethod::Create | CatalogMethod::Update => ops.push(LocalOp::Cache),
                CatalogMethod::Delete => ops.push(LocalOp::Remove),
                CatalogMethod::Search if !remote => ops.push(LocalOp::Search),
                CatalogMethod::Count if !remote => ops.push(LocalOp::Count),
                CatalogMethod::GetPaginated if !remote => ops.push(LocalOp::GetPaginated),
                CatalogMethod::DeleteAll => ops.push(LocalOp::ClearAll),
                _ => {}
            }
        }
        ops.sort();
        ops.dedup();
        ops
    }

    fn doc_for(&self, def: &MethodDef) -> String {
        def.doc
            .replace("{entity}", &self.entity.sentence().to_lowercase())
    }

    // ── Rendering ────────────────────────────────────────────────────────

    pub fn render_interface(&self) -> String {
        let entity = self.entity_class();
        let mut w = SourceWriter::new();

        w.imports([relative_import(&self.interface_path(), &self.entity_path())]);
        w.doc(format!("Contract for reading and writing [{entity}] values."));
        w.open(format!("abstract class {} {{", self.interface_name()));
        for (i, method) in self.methods.iter().enumerate() {
            if i > 0 {
                w.blank();
            }
            match method {
                RepositoryMethod::Catalog(m) => {
                    let def = m.def();
                    w.doc(self.doc_for(def));
                    w.line(format!("{};", def.signature(&entity)));
                }
                RepositoryMethod::Custom(id) => {
                    w.doc("Custom operation; not part of the method catalog.");
                    w.line(format!("Future<dynamic> {}();", id.camel()));
                }
            }
        }
        w.close("}");
        w.finish()
    }

    pub fn render_impl(&self) -> String {
        let entity = self.entity_class();
        let remote = self.remote_name();
        let local = self.local_name();
        let path = self.impl_path();
        let mut w = SourceWriter::new();

        let mut imports = vec![
            relative_import(&path, &self.entity_path()),
            relative_import(&path, &self.interface_path()),
        ];
        if self.sources.remote {
            imports.push(relative_import(&path, &self.remote_path()));
        }
        if self.sources.local {
            imports.push(relative_import(&path, &self.local_path()));
        }
        w.imports(imports);

        let summary = match (self.sources.remote, self.sources.local) {
            (true, true) => "backed by a remote source with a local cache",
            (true, false) => "backed by a remote source",
            (false, true) => "backed by a local store",
            (false, false) => "with no data sources; every method throws until wired",
        };
        w.doc(format!("[{}] {summary}.", self.interface_name()));
        w.open(format!(
            "class {} implements {} {{",
            self.impl_name(),
            self.interface_name()
        ));

        // Constructor + collaborators
        if self.sources.none() {
            w.line(format!("const {}();", self.impl_name()));
        } else {
            w.open(format!("const {}({{", self.impl_name()));
            if self.sources.remote {
                w.line("required this.remote,");
            }
            if self.sources.local {
                w.line("required this.local,");
            }
            w.close("});");
            w.blank();
            if self.sources.remote {
                w.line(format!("final {remote} remote;"));
            }
            if self.sources.local {
                w.line(format!("final {local} local;"));
            }
        }

        for method in &self.methods {
            w.blank();
            w.line("@override");
            match method {
                RepositoryMethod::Catalog(m) => {
                    let def = m.def();
                    self.render_method(&mut w, def, def.name, &entity);
                }
                RepositoryMethod::Custom(id) => {
                    let name = id.camel();
                    w.open(format!("Future<dynamic> {name}() async {{"));
                    w.line(unimplemented(&name));
                    w.close("}");
                }
            }
        }

        for helper in self.hidden_helpers() {
            let def = helper.def();
            w.blank();
            self.render_method(&mut w, def, &format!("_{}", def.name), &entity);
        }

        w.close("}");
        w.finish()
    }

    fn render_method(&self, w: &mut SourceWriter, def: &MethodDef, name: &str, entity: &str) {
        w.open(format!("{} async {{", def.signature_named(name, entity)));
        w.lines(self.body(def, entity));
        w.close("}");
    }

    /// Implementation body of a catalog method.
    fn body(&self, def: &MethodDef, entity: &str) -> Vec<String> {
        let DataSources { remote, local } = self.sources;
        let call = |target: &str| format!("{target}.{}({})", def.name, def.args);
        let stub = || vec![unimplemented(def.name)];
        // Calls back into the repository go through the public method when
        // requested, else the private helper.
        let own = |m: CatalogMethod| {
            if self.requested(m) {
                m.name().to_string()
            } else {
                format!("_{}", m.name())
            }
        };

        match def.coordination {
            Coordination::RemoteThenCache => match (remote, local) {
                (true, true) => vec![
                    "try {".into(),
                    format!("  final items = await {};", call("remote")),
                    "  await local.cacheAll(items);".into(),
                    "  return items;".into(),
                    "} catch (_) {".into(),
                    "  return local.getAll();".into(),
                    "}".into(),
                ],
                (true, false) => vec![format!("return {};", call("remote"))],
                (false, true) => vec!["return local.getAll();".into()],
                (false, false) => stub(),
            },
            Coordination::CacheThenRemote => match (remote, local) {
                (true, true) => vec![
                    "final cached = await local.getById(id);".into(),
                    "if (cached != null) return cached;".into(),
                    "final fetched = await remote.getById(id);".into(),
                    "if (fetched != null) await local.cache(fetched);".into(),
                    "return fetched;".into(),
                ],
                (true, false) => vec![format!("return {};", call("remote"))],
                (false, true) => vec!["return local.getById(id);".into()],
                (false, false) => stub(),
            },
            Coordination::WriteThrough => match (remote, local) {
                (true, true) => vec![
                    format!("final saved = await {};", call("remote")),
                    "await local.cache(saved);".into(),
                    "return saved;".into(),
                ],
                (true, false) => vec![format!("return {};", call("remote"))],
                (false, true) => vec![
                    "await local.cache(entity);".into(),
                    "return entity;".into(),
                ],
                (false, false) => stub(),
            },
            Coordination::DeleteThrough => match (remote, local) {
                (true, true) => vec![
                    format!("await {};", call("remote")),
                    "await local.remove(id);".into(),
                ],
                (true, false) => vec![format!("await {};", call("remote"))],
                (false, true) => vec!["await local.remove(id);".into()],
                (false, false) => stub(),
            },
            Coordination::Delegate => {
                if remote {
                    vec![format!("return {};", call("remote"))]
                } else if local {
                    vec![format!("return {};", call("local"))]
                } else {
                    stub()
                }
            }
            Coordination::ViaGetById => {
                vec![format!("return (await {}(id)) != null;", own(CatalogMethod::GetById))]
            }
            Coordination::EachGetById => vec![
                format!("final found = <{entity}>[];"),
                "for (final id in ids) {".into(),
                format!("  final item = await {}(id);", own(CatalogMethod::GetById)),
                "  if (item != null) found.add(item);".into(),
                "}".into(),
                "return found;".into(),
            ],
            Coordination::ClearBoth => match (remote, local) {
                (false, false) => stub(),
                _ => {
                    let mut lines = Vec::new();
                    if remote {
                        lines.push("await remote.deleteAll();".to_string());
                    }
                    if local {
                        lines.push("await local.clearAll();".to_string());
                    }
                    lines
                }
            },
            Coordination::EachCreate => vec![
                format!("final created = <{entity}>[];"),
                "for (final entity in entities) {".into(),
                format!("  created.add(await {}(entity));", own(CatalogMethod::Create)),
                "}".into(),
                "return created;".into(),
            ],
        }
    }

    pub fn render_remote(&self) -> String {
        let entity = self.entity_class();
        let name = self.remote_name();
        let defs = self.remote_methods();
        let mut w = SourceWriter::new();

        w.imports([relative_import(&self.remote_path(), &self.entity_path())]);
        w.doc(format!("Remote origin of [{entity}] values."));
        w.open(format!("abstract class {name} {{"));
        for def in &defs {
            w.line(format!("{};", def.signature(&entity)));
        }
        w.close("}");
        w.blank();

        w.doc("Placeholder remote source. Replace the bodies with real API calls.");
        w.open(format!("class {name}Impl implements {name} {{"));
        w.line(format!("const {name}Impl();"));
        for def in &defs {
            w.blank();
            w.line("@override");
            w.open(format!("{} async {{", def.signature(&entity)));
            w.line(unimplemented(&format!("{name}.{}", def.name)));
            w.close("}");
        }
        w.close("}");
        w.finish()
    }

    pub fn render_local(&self) -> String {
        let entity = self.entity_class();
        let name = self.local_name();
        let ops = self.local_ops();
        let mut w = SourceWriter::new();

        w.imports([relative_import(&self.local_path(), &self.entity_path())]);
        w.doc(format!("Local cache of [{entity}] values."));
        w.open(format!("abstract class {name} {{"));
        for op in &ops {
            w.line(format!("{};", op.signature(&entity)));
        }
        w.close("}");
        w.blank();

        w.doc(format!(
            "In-memory [{name}] keyed by `id`.\n\nEach instance owns its store; pass one in to share or inspect it."
        ));
        w.open(format!("class {name}Impl implements {name} {{"));
        w.line(format!("{name}Impl({{Map<String, {entity}>? store}})"));
        w.line(format!("    : _store = store ?? <String, {entity}>{{}};"));
        w.blank();
        w.line(format!("final Map<String, {entity}> _store;"));
        for op in &ops {
            w.blank();
            w.line("@override");
            w.open(format!("{} async {{", op.signature(&entity)));
            w.lines(op.body());
            w.close("}");
        }
        w.close("}");
        w.finish()
    }

    /// Only the interface, for use cases generated without an implementation.
    pub fn generate_interface(&self) -> FileSet {
        let mut files = FileSet::new();
        files.insert(self.interface_path(), self.render_interface());
        files
    }

    pub fn generate(&self) -> FileSet {
        tracing::debug!(
            repository = %self.interface_name(),
            methods = self.methods.len(),
            remote = self.sources.remote,
            local = self.sources.local,
            "rendering repository"
        );
        let mut files = self.generate_interface();
        files.insert(self.impl_path(), self.render_impl());
        if self.sources.remote {
            files.insert(self.remote_path(), self.render_remote());
        }
        if self.sources.local {
            files.insert(self.local_path(), self.render_local());
        }
        files
    }
}
