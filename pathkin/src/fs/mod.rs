//! The filesystem adapter seam.
//!
//! Everything in the core that touches the real filesystem goes through the
//! [`Filesystem`] trait: classification, canonicalization, child listing and
//! line reading. The pure-text operations (`join`, `split`, `relative_to`)
//! have default implementations shared by every backend, so a backend only
//! has to supply actual I/O.
//!
//! Two backends ship with the crate:
//!
//! - [`OsFilesystem`]: the real thing, backed by `std::fs`.
//! - [`MemFilesystem`]: a deterministic in-memory double for tests, doctests
//!   and benchmarks. The core performs no I/O outside this seam, so the two
//!   are interchangeable.

pub mod mem;
pub mod normalize;
pub mod os;

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

pub use mem::MemFilesystem;
pub use os::OsFilesystem;

/// A lazily produced stream of child names or text lines.
///
/// Failures encountered while producing an element surface at the point of
/// production, not eagerly at stream construction.
pub type TextStream = Box<dyn Iterator<Item = Result<String>> + Send>;

/// What a canonical path resolves to on the filesystem.
///
/// `Absent` is a normal, expected outcome of factory lookup, never an error.
///
/// # Examples
///
/// ```
/// use pathkin::fs::Classification;
///
/// assert!(Classification::Directory.is_directory());
/// assert!(!Classification::Absent.is_present());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// The path denotes a directory.
    Directory,
    /// The path denotes a regular file.
    File,
    /// The path denotes no filesystem object at all.
    Absent,
}

impl Classification {
    /// Check whether this classification is a directory.
    #[must_use]
    pub fn is_directory(self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Check whether this classification is a regular file.
    #[must_use]
    pub fn is_file(self) -> bool {
        matches!(self, Self::File)
    }

    /// Check whether the path denotes any object at all.
    #[must_use]
    pub fn is_present(self) -> bool {
        !matches!(self, Self::Absent)
    }
}

/// The adapter contract for all filesystem access.
///
/// Implementations must be shareable across threads; the registry holds one
/// behind an `Arc`. The I/O methods (`classify`, `canonicalize`,
/// `list_children`, `read_lines`) are backend-specific; the textual methods
/// default to the platform rules below and rarely need overriding.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Classify a canonical path as directory, file, or absent.
    ///
    /// # Errors
    ///
    /// Returns an error for I/O failures other than "does not exist"
    /// (which is `Ok(Classification::Absent)`).
    fn classify(&self, path: &Path) -> Result<Classification>;

    /// Canonicalize a path to absolute, normalized form.
    ///
    /// The result is the interning key for absolute nodes: no `.` or `..`
    /// components, no trailing separator, anchored at a root.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be normalized (for example,
    /// `..` escaping the root, or the working directory being unavailable).
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;

    /// Produce a lazy stream of immediate child names of a directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be opened; per-entry
    /// failures are yielded by the stream itself.
    fn list_children(&self, path: &Path) -> Result<TextStream>;

    /// Produce a lazy stream of text lines of a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened; per-line failures are
    /// yielded by the stream itself.
    fn read_lines(&self, path: &Path) -> Result<TextStream>;

    /// Join one segment onto a base textually.
    ///
    /// Follows platform join semantics: an absolute segment supersedes
    /// the base. Multi-segment joins fold over this.
    fn join(&self, base: &Path, segment: &Path) -> PathBuf {
        join_segments(&[base, segment])
    }

    /// Split a path into `(parent, name)`.
    ///
    /// A root has no parent and splits to `(None, <the root itself>)`;
    /// there is no way to construct a self-parenting pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the final segment is not valid UTF-8.
    fn split(&self, path: &Path) -> Result<(Option<PathBuf>, String)> {
        split_path(path)
    }

    /// Derive the relative form of `path` with respect to `start`.
    ///
    /// Both operands are canonicalized first, then walked componentwise;
    /// the result may climb with `..` segments. Equal operands yield `.`.
    ///
    /// # Errors
    ///
    /// Returns an error if either operand cannot be canonicalized.
    fn relative_to(&self, path: &Path, start: &Path) -> Result<PathBuf> {
        let path = self.canonicalize(path)?;
        let start = self.canonicalize(start)?;
        Ok(relative_form(&path, &start))
    }
}

/// Platform-rule segment join used by the default `Filesystem::join`.
pub(crate) fn join_segments(segments: &[&Path]) -> PathBuf {
    let mut joined = PathBuf::new();
    for segment in segments {
        // PathBuf::push resets on an absolute segment, matching the
        // platform join rule.
        joined.push(segment);
    }
    joined
}

/// Parent/name split used by the default `Filesystem::split`.
pub(crate) fn split_path(path: &Path) -> Result<(Option<PathBuf>, String)> {
    match path.file_name() {
        Some(name) => {
            let name = name
                .to_str()
                .ok_or_else(|| Error::InvalidPath {
                    path: path.to_path_buf(),
                    reason: "path segment contains invalid UTF-8".to_string(),
                })?
                .to_string();
            Ok((path.parent().map(Path::to_path_buf), name))
        }
        // No final segment: the path is itself a root (or empty). The
        // split degenerates so a root can never become its own parent.
        None => {
            let name = path
                .to_str()
                .ok_or_else(|| Error::InvalidPath {
                    path: path.to_path_buf(),
                    reason: "path contains invalid UTF-8".to_string(),
                })?
                .to_string();
            Ok((None, name))
        }
    }
}

/// Componentwise relative derivation used by the default
/// `Filesystem::relative_to`. Both inputs must already be canonical.
pub(crate) fn relative_form(path: &Path, start: &Path) -> PathBuf {
    let path_parts: Vec<Component<'_>> = path.components().collect();
    let start_parts: Vec<Component<'_>> = start.components().collect();

    let common = path_parts
        .iter()
        .zip(start_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..start_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part);
    }

    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    relative
}
