//! Path safety for generated output.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::domain::error::DomainError;

/// A filesystem path guaranteed to be **relative** and to stay below its base.
///
/// Generated files are always addressed relative to an output root. An
/// absolute path or a `..` component would let a generated name escape that
/// root, so neither can be represented by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Try to create a relative path.
    ///
    /// # Errors
    ///
    /// `InvalidPath` for empty, absolute, or parent-ascending paths.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let invalid = |reason: &str| DomainError::InvalidPath {
            path: path.display().to_string(),
            reason: reason.to_string(),
        };

        if path.as_os_str().is_empty() {
            return Err(invalid("path is empty"));
        }
        if path.is_absolute() || path.has_root() {
            return Err(invalid("path must be relative"));
        }
        for component in path.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                Component::ParentDir => return Err(invalid("path cannot contain '..'")),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid("path must be relative"));
                }
            }
        }

        Ok(Self(path))
    }

    /// Join a path segment onto this relative path.
    ///
    /// # Errors
    ///
    /// Same as [`RelativePath::try_new`] for the joined result.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, DomainError> {
        Self::try_new(self.0.join(segment))
    }

    /// Borrow as a `Path`.
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Forward-slash form used as a `FileSet` key.
    pub fn to_slash_string(&self) -> String {
        self.0
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_accepts_relative() {
        let p = RelativePath::try_new("lib/main.dart").unwrap();
        assert_eq!(p.as_path(), Path::new("lib/main.dart"));
    }

    #[test]
    fn try_new_rejects_absolute() {
        assert!(matches!(
            RelativePath::try_new("/etc/passwd"),
            Err(DomainError::InvalidPath { .. })
        ));
    }

    #[test]
    fn try_new_rejects_parent_components() {
        assert!(RelativePath::try_new("lib/../../etc").is_err());
        assert!(RelativePath::try_new("..").is_err());
    }

    #[test]
    fn try_new_rejects_empty() {
        assert!(RelativePath::try_new("").is_err());
    }

    #[test]
    fn join_relative_path() {
        let base = RelativePath::try_new("lib").unwrap();
        let joined = base.join("main.dart").unwrap();
        assert_eq!(joined.to_slash_string(), "lib/main.dart");
    }

    #[test]
    fn join_rejects_escape() {
        let base = RelativePath::try_new("lib").unwrap();
        assert!(base.join("../../x").is_err());
    }

    #[test]
    fn slash_string_drops_current_dir() {
        let p = RelativePath::try_new("./lib/./app.dart").unwrap();
        assert_eq!(p.to_slash_string(), "lib/app.dart");
    }
}
