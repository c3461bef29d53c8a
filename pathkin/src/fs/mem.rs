//! A pure in-memory filesystem double.
//!
//! The core performs no I/O outside the [`Filesystem`] seam, so this double
//! substitutes for the real backend in tests, doctests and benchmarks with
//! fully deterministic contents.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::fs::normalize::resolve_dots;
use crate::fs::{Classification, Filesystem, TextStream};

#[derive(Debug, Clone)]
enum MemEntry {
    Directory,
    File(Vec<String>),
}

/// In-memory [`Filesystem`] with builder-style fixture construction.
///
/// Canonicalization anchors relative input at a configurable working
/// directory and resolves dot components; there are no symlinks.
///
/// # Examples
///
/// ```
/// use pathkin::fs::{Classification, Filesystem, MemFilesystem};
/// use std::path::Path;
///
/// let fs = MemFilesystem::new()
///     .with_dir("/a/b")
///     .with_file("/a/notes.txt", &["first line", "second line"]);
///
/// assert_eq!(fs.classify(Path::new("/a/b")).unwrap(), Classification::Directory);
/// assert_eq!(fs.classify(Path::new("/missing")).unwrap(), Classification::Absent);
/// ```
#[derive(Debug, Clone)]
pub struct MemFilesystem {
    cwd: PathBuf,
    entries: BTreeMap<PathBuf, MemEntry>,
}

impl Default for MemFilesystem {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(PathBuf::from("/"), MemEntry::Directory);
        Self {
            cwd: PathBuf::from("/"),
            entries,
        }
    }
}

impl MemFilesystem {
    /// Create an empty in-memory filesystem containing only the root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the working directory used to anchor relative input.
    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    /// Add a directory, creating missing ancestors.
    #[must_use]
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        let path = self.normalize(path.as_ref());
        self.insert_ancestors(&path);
        self.entries.insert(path, MemEntry::Directory);
        self
    }

    /// Add a file with the given lines, creating missing ancestors.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>, lines: &[&str]) -> Self {
        let path = self.normalize(path.as_ref());
        self.insert_ancestors(&path);
        self.entries.insert(
            path,
            MemEntry::File(lines.iter().map(ToString::to_string).collect()),
        );
        self
    }

    /// Remove an entry, simulating an object vanishing between operations.
    pub fn remove(&mut self, path: impl AsRef<Path>) {
        let path = self.normalize(path.as_ref());
        self.entries.remove(&path);
    }

    fn insert_ancestors(&mut self, path: &Path) {
        let mut ancestor = path.parent();
        while let Some(dir) = ancestor {
            self.entries
                .entry(dir.to_path_buf())
                .or_insert(MemEntry::Directory);
            ancestor = dir.parent();
        }
    }

    fn normalize(&self, path: &Path) -> PathBuf {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        };
        // Fixture paths are under test control; escaping the root is a
        // fixture bug worth failing loudly on.
        resolve_dots(&absolute).unwrap_or(absolute)
    }
}

impl Filesystem for MemFilesystem {
    fn classify(&self, path: &Path) -> Result<Classification> {
        match self.entries.get(path) {
            Some(MemEntry::Directory) => Ok(Classification::Directory),
            Some(MemEntry::File(_)) => Ok(Classification::File),
            None => Ok(Classification::Absent),
        }
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        };
        resolve_dots(&absolute)
    }

    fn list_children(&self, path: &Path) -> Result<TextStream> {
        match self.entries.get(path) {
            Some(MemEntry::Directory) => {}
            Some(MemEntry::File(_)) => {
                return Err(Error::InvalidPath {
                    path: path.to_path_buf(),
                    reason: "not a directory".to_string(),
                })
            }
            None => {
                return Err(Error::PathNotFound {
                    path: path.to_path_buf(),
                })
            }
        }

        let names: Vec<String> = self
            .entries
            .keys()
            .filter(|candidate| candidate.parent() == Some(path))
            .filter_map(|candidate| candidate.file_name())
            .filter_map(|name| name.to_str().map(str::to_string))
            .collect();

        Ok(Box::new(names.into_iter().map(Ok)))
    }

    fn read_lines(&self, path: &Path) -> Result<TextStream> {
        match self.entries.get(path) {
            Some(MemEntry::File(lines)) => {
                let lines = lines.clone();
                Ok(Box::new(lines.into_iter().map(Ok)))
            }
            Some(MemEntry::Directory) => Err(Error::InvalidPath {
                path: path.to_path_buf(),
                reason: "not a regular file".to_string(),
            }),
            None => Err(Error::PathNotFound {
                path: path.to_path_buf(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ancestors_created_implicitly() {
        let fs = MemFilesystem::new().with_file("/a/b/c.txt", &["x"]);
        assert_eq!(
            fs.classify(Path::new("/a")).unwrap(),
            Classification::Directory
        );
        assert_eq!(
            fs.classify(Path::new("/a/b")).unwrap(),
            Classification::Directory
        );
        assert_eq!(
            fs.classify(Path::new("/a/b/c.txt")).unwrap(),
            Classification::File
        );
    }

    #[test]
    fn test_canonicalize_uses_cwd() {
        let fs = MemFilesystem::new().with_cwd("/work");
        assert_eq!(
            fs.canonicalize(Path::new("sub/../thing")).unwrap(),
            PathBuf::from("/work/thing")
        );
    }

    #[test]
    fn test_list_children_only_immediate() {
        let fs = MemFilesystem::new()
            .with_dir("/top/one")
            .with_dir("/top/two/deep")
            .with_file("/top/file", &[]);

        let mut names: Vec<String> = fs
            .list_children(Path::new("/top"))
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        names.sort();
        assert_eq!(names, vec!["file", "one", "two"]);
    }

    #[test]
    fn test_read_lines_round() {
        let fs = MemFilesystem::new().with_file("/f", &["a", "b"]);
        let lines: Vec<String> = fs
            .read_lines(Path::new("/f"))
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_read_lines_on_directory_fails() {
        let fs = MemFilesystem::new().with_dir("/d");
        assert!(fs.read_lines(Path::new("/d")).is_err());
    }

    #[test]
    fn test_remove_makes_absent() {
        let mut fs = MemFilesystem::new().with_dir("/gone");
        fs.remove("/gone");
        assert_eq!(
            fs.classify(Path::new("/gone")).unwrap(),
            Classification::Absent
        );
    }
}
