//! Repository method catalog.
//!
//! # Design
//!
//! Each repository method the generator knows about is described exactly
//! once by a [`MethodDef`] in [`METHOD_CATALOG`]: its Dart signature, its
//! doc line, whether it belongs on the remote data source, and how the
//! implementation coordinates the remote and local data sources. Every
//! template reads from this table; none of them hard-code a method.
//!
//! Membership is closed. Any other requested name becomes a
//! [`RepositoryMethod::Custom`] stub and a non-fatal warning.
//!
//! # Adding a Method
//!
//! 1. Add a variant to [`CatalogMethod`]
//! 2. Add one [`MethodDef`] entry to [`METHOD_CATALOG`]
//! 3. Teach the repository template its [`Coordination`] if it is new

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::naming::{Identifier, to_camel_case, to_snake_case};

// ── Catalog types ────────────────────────────────────────────────────────────

/// A method with a typed signature and a known coordination strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CatalogMethod {
    GetAll,
    GetById,
    Create,
    Update,
    Delete,
    Search,
    Count,
    Exists,
    GetPaginated,
    GetByIds,
    DeleteAll,
    CreateMany,
}

/// How a repository implementation combines its data sources for a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Coordination {
    /// Remote first; cache the result locally; fall back to the cache on failure.
    RemoteThenCache,
    /// Local cache first; on a miss ask remote and cache what it returns.
    CacheThenRemote,
    /// Remote write, then cache the returned value. Local-only caches the input.
    WriteThrough,
    /// Remote delete, then evict from the cache.
    DeleteThrough,
    /// Delegate to remote if present, else local, else not implemented.
    Delegate,
    /// `getById(id) != null`.
    ViaGetById,
    /// Sequential `getById` per id, keeping non-null results in order.
    EachGetById,
    /// Remote `deleteAll`, then local `clearAll`, each only if present.
    ClearBoth,
    /// Sequential `create` per entity, results in input order.
    EachCreate,
}

/// Static description of one catalog method.
///
/// `{E}` in `return_type` and `params` stands for the entity class name.
#[derive(Debug, Clone, Copy)]
pub struct MethodDef {
    pub method: CatalogMethod,
    pub name: &'static str,
    pub return_type: &'static str,
    pub params: &'static str,
    /// Argument list forwarding `params` to another call.
    pub args: &'static str,
    pub doc: &'static str,
    /// Whether the remote data source interface declares this method.
    pub remote: bool,
    pub coordination: Coordination,
}

impl MethodDef {
    /// `Future<E?> getById(String id)`.
    pub fn signature(&self, entity: &str) -> String {
        format!(
            "{} {}({})",
            self.return_type.replace("{E}", entity),
            self.name,
            self.params.replace("{E}", entity)
        )
    }

    /// Signature under a different method name, used for private helpers.
    pub fn signature_named(&self, name: &str, entity: &str) -> String {
        format!(
            "{} {}({})",
            self.return_type.replace("{E}", entity),
            name,
            self.params.replace("{E}", entity)
        )
    }

    /// Catalog methods this one calls through the repository itself.
    pub const fn depends_on(&self) -> Option<CatalogMethod> {
        match self.coordination {
            Coordination::ViaGetById | Coordination::EachGetById => Some(CatalogMethod::GetById),
            Coordination::EachCreate => Some(CatalogMethod::Create),
            _ => None,
        }
    }
}

// ── The catalog ──────────────────────────────────────────────────────────────

/// Single source of truth for repository methods, in canonical order.
pub static METHOD_CATALOG: &[MethodDef] = &[
    MethodDef {
        method: CatalogMethod::GetAll,
        name: "getAll",
        return_type: "Future<List<{E}>>",
        params: "",
        args: "",
        doc: "Returns every {entity}.",
        remote: true,
        coordination: Coordination::RemoteThenCache,
    },
    MethodDef {
        method: CatalogMethod::GetById,
        name: "getById",
        return_type: "Future<{E}?>",
        params: "String id",
        args: "id",
        doc: "Returns the {entity} with [id], or `null` when none exists.",
        remote: true,
        coordination: Coordination::CacheThenRemote,
    },
    MethodDef {
        method: CatalogMethod::Create,
        name: "create",
        return_type: "Future<{E}>",
        params: "{E} entity",
        args: "entity",
        doc: "Persists a new {entity} and returns the stored value.",
        remote: true,
        coordination: Coordination::WriteThrough,
    },
    MethodDef {
        method: CatalogMethod::Update,
        name: "update",
        return_type: "Future<{E}>",
        params: "{E} entity",
        args: "entity",
        doc: "Replaces an existing {entity} and returns the stored value.",
        remote: true,
        coordination: Coordination::WriteThrough,
    },
    MethodDef {
        method: CatalogMethod::Delete,
        name: "delete",
        return_type: "Future<void>",
        params: "String id",
        args: "id",
        doc: "Removes the {entity} with [id].",
        remote: true,
        coordination: Coordination::DeleteThrough,
    },
    MethodDef {
        method: CatalogMethod::Search,
        name: "search",
        return_type: "Future<List<{E}>>",
        params: "String query",
        args: "query",
        doc: "Returns every {entity} matching [query].",
        remote: true,
        coordination: Coordination::Delegate,
    },
    MethodDef {
        method: CatalogMethod::Count,
        name: "count",
        return_type: "Future<int>",
        params: "",
        args: "",
        doc: "Returns the number of stored {entity} values.",
        remote: true,
        coordination: Coordination::Delegate,
    },
    MethodDef {
        method: CatalogMethod::Exists,
        name: "exists",
        return_type: "Future<bool>",
        params: "String id",
        args: "id",
        doc: "Whether a {entity} with [id] exists.",
        remote: false,
        coordination: Coordination::ViaGetById,
    },
    MethodDef {
        method: CatalogMethod::GetPaginated,
        name: "getPaginated",
        return_type: "Future<List<{E}>>",
        params: "{int page = 1, int pageSize = 20}",
        args: "page: page, pageSize: pageSize",
        doc: "Returns one page of {entity} values; [page] starts at 1.",
        remote: true,
        coordination: Coordination::Delegate,
    },
    MethodDef {
        method: CatalogMethod::GetByIds,
        name: "getByIds",
        return_type: "Future<List<{E}>>",
        params: "List<String> ids",
        args: "ids",
        doc: "Returns the {entity} values found for [ids], in input order.",
        remote: false,
        coordination: Coordination::EachGetById,
    },
    MethodDef {
        method: CatalogMethod::DeleteAll,
        name: "deleteAll",
        return_type: "Future<void>",
        params: "",
        args: "",
        doc: "Removes every {entity}.",
        remote: true,
        coordination: Coordination::ClearBoth,
    },
    MethodDef {
        method: CatalogMethod::CreateMany,
        name: "createMany",
        return_type: "Future<List<{E}>>",
        params: "List<{E}> entities",
        args: "entities",
        doc: "Persists [entities] one by one and returns the stored values.",
        remote: false,
        coordination: Coordination::EachCreate,
    },
];

/// Methods generated when the caller requests none.
pub const DEFAULT_METHODS: &[CatalogMethod] = &[
    CatalogMethod::GetAll,
    CatalogMethod::GetById,
    CatalogMethod::Create,
    CatalogMethod::Update,
    CatalogMethod::Delete,
];

impl CatalogMethod {
    /// Catalog entry for this method.
    pub fn def(self) -> &'static MethodDef {
        // Entries are listed in variant order.
        &METHOD_CATALOG[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.def().name
    }

    /// Look a method up by name. `get_by_id`, `GetById` and `getById` agree.
    pub fn lookup(name: &str) -> Option<Self> {
        let normalized = to_camel_case(&to_snake_case(name.trim()));
        METHOD_CATALOG
            .iter()
            .find(|d| d.name == normalized)
            .map(|d| d.method)
    }

    pub fn all() -> impl Iterator<Item = CatalogMethod> {
        METHOD_CATALOG.iter().map(|d| d.method)
    }
}

impl fmt::Display for CatalogMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Requested methods ────────────────────────────────────────────────────────

/// One method requested for a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RepositoryMethod {
    Catalog(CatalogMethod),
    /// Outside the catalog: rendered as a "not implemented" stub.
    Custom(Identifier),
}

impl RepositoryMethod {
    /// Resolve a requested name.
    ///
    /// # Errors
    ///
    /// `InvalidName` when an unknown name cannot be a Dart method name.
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        match CatalogMethod::lookup(name) {
            Some(method) => Ok(Self::Catalog(method)),
            None => Identifier::parse(name.trim()).map(Self::Custom),
        }
    }

    /// Dart method name.
    pub fn name(&self) -> String {
        match self {
            Self::Catalog(m) => m.name().to_string(),
            Self::Custom(id) => id.camel(),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for RepositoryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Parse requested names, falling back to [`DEFAULT_METHODS`] when empty.
///
/// Repeated names keep their first position.
pub fn resolve_methods<S: AsRef<str>>(names: &[S]) -> Result<Vec<RepositoryMethod>, DomainError> {
    if names.is_empty() {
        return Ok(DEFAULT_METHODS
            .iter()
            .copied()
            .map(RepositoryMethod::Catalog)
            .collect());
    }

    let mut methods: Vec<RepositoryMethod> = Vec::with_capacity(names.len());
    for name in names {
        let method = RepositoryMethod::parse(name.as_ref())?;
        if !methods.iter().any(|m| m.name() == method.name()) {
            methods.push(method);
        }
    }
    Ok(methods)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_has_exactly_one_entry() {
        assert_eq!(METHOD_CATALOG.len(), 12);
        for def in METHOD_CATALOG {
            let count = METHOD_CATALOG
                .iter()
                .filter(|d| d.method == def.method)
                .count();
            assert_eq!(count, 1, "{} registered twice", def.name);
            assert_eq!(def.method.def().name, def.name);
        }
    }

    #[test]
    fn catalog_order_is_canonical() {
        let names: Vec<_> = CatalogMethod::all().map(CatalogMethod::name).collect();
        assert_eq!(
            names,
            [
                "getAll",
                "getById",
                "create",
                "update",
                "delete",
                "search",
                "count",
                "exists",
                "getPaginated",
                "getByIds",
                "deleteAll",
                "createMany"
            ]
        );
    }

    #[test]
    fn signatures_substitute_entity() {
        assert_eq!(
            CatalogMethod::GetById.def().signature("TaskEntity"),
            "Future<TaskEntity?> getById(String id)"
        );
        assert_eq!(
            CatalogMethod::CreateMany.def().signature("T"),
            "Future<List<T>> createMany(List<T> entities)"
        );
    }

    #[test]
    fn lookup_accepts_any_casing() {
        assert_eq!(CatalogMethod::lookup("get_by_id"), Some(CatalogMethod::GetById));
        assert_eq!(CatalogMethod::lookup("GetAll"), Some(CatalogMethod::GetAll));
        assert_eq!(CatalogMethod::lookup("archive"), None);
    }

    #[test]
    fn empty_request_falls_back_to_default_five() {
        let methods = resolve_methods::<&str>(&[]).unwrap();
        let names: Vec<_> = methods.iter().map(RepositoryMethod::name).collect();
        assert_eq!(names, ["getAll", "getById", "create", "update", "delete"]);
    }

    #[test]
    fn unknown_names_become_custom() {
        let methods = resolve_methods(&["archive", "getAll"]).unwrap();
        assert!(methods[0].is_custom());
        assert_eq!(methods[1], RepositoryMethod::Catalog(CatalogMethod::GetAll));
    }

    #[test]
    fn duplicates_keep_first() {
        let methods = resolve_methods(&["delete", "getAll", "delete"]).unwrap();
        assert_eq!(methods.len(), 2);
        assert_eq!(methods[0].name(), "delete");
    }

    #[test]
    fn unusable_custom_names_are_rejected() {
        assert!(matches!(
            resolve_methods(&["drop table"]),
            Err(DomainError::InvalidName { .. })
        ));
    }

    #[test]
    fn helper_dependencies() {
        assert_eq!(
            CatalogMethod::Exists.def().depends_on(),
            Some(CatalogMethod::GetById)
        );
        assert_eq!(
            CatalogMethod::CreateMany.def().depends_on(),
            Some(CatalogMethod::Create)
        );
        assert_eq!(CatalogMethod::GetAll.def().depends_on(), None);
    }
}
