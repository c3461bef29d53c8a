//! The real-filesystem adapter backend.

use std::env;
use std::fs;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::fs::normalize::absolutize;
use crate::fs::{Classification, Filesystem, TextStream};

/// Filesystem adapter backed by `std::fs`.
///
/// Canonicalization normalizes textually (tilde, working-directory
/// anchoring, dot components) and then follows symlinks best-effort: a path
/// that does not exist yet keeps its normalized form rather than failing.
///
/// # Examples
///
/// ```
/// use pathkin::fs::{Filesystem, OsFilesystem};
/// use std::path::Path;
///
/// let fs = OsFilesystem::new();
/// let canonical = fs.canonicalize(Path::new("/a/./b/../c")).unwrap();
/// assert_eq!(canonical, Path::new("/a/c"));
/// ```
#[derive(Debug, Clone)]
pub struct OsFilesystem {
    /// Whether canonicalization follows symlinks for existing paths.
    follow_symlinks: bool,
}

impl Default for OsFilesystem {
    fn default() -> Self {
        Self {
            follow_symlinks: true,
        }
    }
}

impl OsFilesystem {
    /// Create an adapter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure whether canonicalization follows symlinks.
    ///
    /// With symlink following disabled, canonicalization is purely textual,
    /// which preserves deliberately symlinked locations.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathkin::fs::OsFilesystem;
    ///
    /// let fs = OsFilesystem::new().with_symlink_following(false);
    /// ```
    #[must_use]
    pub fn with_symlink_following(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}

/// Map an open/stat failure onto the crate error vocabulary.
fn io_error(path: &Path, err: std::io::Error) -> Error {
    match err.kind() {
        ErrorKind::NotFound => Error::PathNotFound {
            path: path.to_path_buf(),
        },
        ErrorKind::PermissionDenied => Error::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => Error::Io(err),
    }
}

impl Filesystem for OsFilesystem {
    fn classify(&self, path: &Path) -> Result<Classification> {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => Ok(Classification::Directory),
            Ok(meta) if meta.is_file() => Ok(Classification::File),
            // Sockets, fifos and friends are not paths for anything here.
            Ok(_) => Ok(Classification::Absent),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Classification::Absent),
            Err(e) => Err(io_error(path, e)),
        }
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        let base = env::current_dir().map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("cannot get current directory: {e}"),
        })?;
        let normalized = absolutize(path, &base)?;

        if !self.follow_symlinks {
            return Ok(normalized);
        }

        match fs::canonicalize(&normalized) {
            Ok(canonical) => Ok(canonical),
            // Not existing yet is fine; the normalized form stands in.
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(normalized),
            Err(e) => Err(io_error(&normalized, e)),
        }
    }

    fn list_children(&self, path: &Path) -> Result<TextStream> {
        let owner = path.to_path_buf();
        let entries = fs::read_dir(path).map_err(|e| io_error(path, e))?;

        Ok(Box::new(entries.map(move |entry| {
            let entry = entry.map_err(|e| io_error(&owner, e))?;
            entry
                .file_name()
                .to_str()
                .map(str::to_string)
                .ok_or_else(|| Error::InvalidPath {
                    path: owner.join(entry.file_name()),
                    reason: "entry name contains invalid UTF-8".to_string(),
                })
        })))
    }

    fn read_lines(&self, path: &Path) -> Result<TextStream> {
        let file = fs::File::open(path).map_err(|e| io_error(path, e))?;
        let reader = BufReader::new(file);

        Ok(Box::new(reader.lines().map(|line| line.map_err(Error::Io))))
    }
}
