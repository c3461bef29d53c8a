//! Textual path normalization.
//!
//! Normalization turns raw input into the absolute, dot-free form used as
//! the interning key: tilde expansion, anchoring relative input at a base
//! directory, and resolution of `.` and `..` components. No symlinks are
//! followed here; that is the backend's concern.

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand a leading tilde (`~`) to the home directory.
///
/// Handles `~` and `~/path`; the `~user` form is rejected.
///
/// # Errors
///
/// Returns an error if the path contains invalid UTF-8, the home directory
/// cannot be determined, or `~user` syntax is used.
///
/// # Examples
///
/// ```
/// use pathkin::fs::normalize::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/project")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with("project"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let text = path.to_str().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "path contains invalid UTF-8".to_string(),
    })?;

    if !text.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "cannot determine home directory".to_string(),
    })?;

    if text == "~" {
        Ok(home)
    } else if let Some(rest) = text.strip_prefix("~/").or_else(|| text.strip_prefix("~\\")) {
        Ok(home.join(rest))
    } else {
        Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}

/// Resolve `.` and `..` components of an absolute path.
///
/// # Errors
///
/// Returns an error if `..` components would escape the root.
///
/// # Examples
///
/// ```
/// use pathkin::fs::normalize::resolve_dots;
/// use std::path::{Path, PathBuf};
///
/// let resolved = resolve_dots(Path::new("/a/./b/../c")).unwrap();
/// assert_eq!(resolved, PathBuf::from("/a/c"));
/// ```
pub fn resolve_dots(path: &Path) -> Result<PathBuf> {
    let mut resolved = PathBuf::new();
    let mut anchored = false;

    for component in path.components() {
        match component {
            Component::RootDir => {
                resolved.push(component);
                anchored = true;
            }
            Component::Prefix(prefix) => {
                resolved.push(prefix.as_os_str());
                anchored = true;
            }
            Component::Normal(segment) => resolved.push(segment),
            Component::CurDir => {}
            Component::ParentDir => {
                if !resolved.pop() {
                    return Err(Error::InvalidPath {
                        path: path.to_path_buf(),
                        reason: "too many '..' components (escapes root)".to_string(),
                    });
                }
            }
        }
    }

    if anchored && resolved.as_os_str().is_empty() {
        resolved.push(Component::RootDir);
    }

    Ok(resolved)
}

/// Normalize a path to absolute, dot-free form against a base directory.
///
/// Expands a leading tilde, anchors relative input at `base`, and resolves
/// `.` and `..` components. `base` itself must be absolute.
///
/// # Errors
///
/// Returns an error if tilde expansion fails or `..` escapes the root.
pub fn absolutize(path: &Path, base: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    };

    resolve_dots(&absolute)
}
