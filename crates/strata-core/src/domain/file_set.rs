//! The generation output type.
//!
//! A [`FileSet`] is an ordered mapping from relative path to file content.
//! Paths are unique; inserting an existing path replaces its content but
//! keeps its original position, so later template steps take precedence
//! without reshuffling the listing.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::common::RelativePath;
use crate::domain::error::DomainError;

/// One not-yet-written file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub path: String,
    pub content: String,
}

impl FileEntry {
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Ordered path → content mapping with last-write-wins inserts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FileSet {
    entries: Vec<FileEntry>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a file. Returns the replaced content, if any.
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) -> Option<String> {
        let path = path.into();
        let content = content.into();
        match self.index.get(&path) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].content, content)),
            None => {
                self.index.insert(path.clone(), self.entries.len());
                self.entries.push(FileEntry { path, content });
                None
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.index
            .get(path)
            .map(|&i| self.entries[i].content.as_str())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Paths in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileEntry> {
        self.entries.iter()
    }

    /// Sum of content sizes in bytes.
    pub fn total_bytes(&self) -> usize {
        self.entries.iter().map(FileEntry::size).sum()
    }

    /// Merge `other` into `self`; `other` wins on shared paths.
    pub fn merge(&mut self, other: FileSet) {
        for entry in other.entries {
            self.insert(entry.path, entry.content);
        }
    }

    /// Consuming form of [`FileSet::merge`].
    #[must_use]
    pub fn merged(mut self, other: FileSet) -> Self {
        self.merge(other);
        self
    }

    /// Re-root every path under `base`.
    ///
    /// # Errors
    ///
    /// `InvalidPath` when `base` or a resulting path is absolute or ascends
    /// out of the base with `..`.
    pub fn prefixed(self, base: &str) -> Result<Self, DomainError> {
        let base = RelativePath::try_new(base)?;
        let mut out = FileSet::new();
        for entry in self.entries {
            let joined = base.join(&entry.path)?;
            out.insert(joined.to_slash_string(), entry.content);
        }
        Ok(out)
    }

    /// Check that every path is a safe relative path.
    pub fn validate(&self) -> Result<(), DomainError> {
        for entry in &self.entries {
            RelativePath::try_new(&entry.path)?;
        }
        Ok(())
    }
}

impl IntoIterator for FileSet {
    type Item = FileEntry;
    type IntoIter = std::vec::IntoIter<FileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a FileEntry;
    type IntoIter = std::slice::Iter<'a, FileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<P: Into<String>, C: Into<String>> FromIterator<(P, C)> for FileSet {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let mut set = FileSet::new();
        for (path, content) in iter {
            set.insert(path, content);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut set = FileSet::new();
        set.insert("a.dart", "1");
        set.insert("b.dart", "2");
        assert_eq!(set.insert("a.dart", "3"), Some("1".into()));
        assert_eq!(set.paths().collect::<Vec<_>>(), ["a.dart", "b.dart"]);
        assert_eq!(set.get("a.dart"), Some("3"));
    }

    #[test]
    fn merge_is_last_write_wins() {
        let first: FileSet = [("a", "old"), ("b", "keep")].into_iter().collect();
        let second: FileSet = [("a", "new"), ("c", "add")].into_iter().collect();
        let merged = first.merged(second);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get("a"), Some("new"));
        assert_eq!(merged.get("b"), Some("keep"));
    }

    #[test]
    fn prefixed_reroots_paths() {
        let set: FileSet = [("domain/x.dart", "")].into_iter().collect();
        let set = set.prefixed("lib/features/task").unwrap();
        assert!(set.contains("lib/features/task/domain/x.dart"));
    }

    #[test]
    fn prefixed_rejects_escaping_base() {
        let set: FileSet = [("x.dart", "")].into_iter().collect();
        assert!(set.clone().prefixed("../out").is_err());
        assert!(set.prefixed("/abs").is_err());
    }

    #[test]
    fn validate_flags_bad_paths() {
        let mut set = FileSet::new();
        set.insert("ok.dart", "");
        assert!(set.validate().is_ok());
        set.insert("../escape.dart", "");
        assert!(set.validate().is_err());
    }

    #[test]
    fn serializes_as_entry_list() {
        let set: FileSet = [("a.dart", "xy")].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"[{"path":"a.dart","content":"xy"}]"#);
    }

    #[test]
    fn total_bytes_sums_content() {
        let set: FileSet = [("a", "abc"), ("b", "de")].into_iter().collect();
        assert_eq!(set.total_bytes(), 5);
    }
}
