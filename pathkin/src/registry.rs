//! The identity registry: canonicalizing, interning node factory.
//!
//! The registry guarantees that at most one node instance exists per
//! canonical absolute path, which is what makes identity-based comparison
//! sound throughout the algebra. It is an explicit, injectable object —
//! one per process run, or one per test — never ambient global state.
//!
//! Interned identity lasts for the registry's lifetime: a location's
//! classification is captured at first resolution and a later change on
//! disk does not invalidate the cached node (cache invalidation is out of
//! scope).

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{Error, Result};
use crate::fs::{Classification, Filesystem, OsFilesystem};
use crate::node::{NodeInner, ObjectClass, PathNode};

struct RegistryShared {
    fs: Arc<dyn Filesystem>,
    cache: Mutex<HashMap<PathBuf, Arc<NodeInner>>>,
}

/// Canonicalizing node factory with one-instance-per-canonical-path
/// interning. Cheap to clone; clones share the cache.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use pathkin::{PathRegistry, fs::MemFilesystem};
///
/// let fs = MemFilesystem::new().with_dir("/projects/demo");
/// let registry = PathRegistry::with_filesystem(Arc::new(fs));
///
/// let first = registry.resolve(&["/projects/demo"]).unwrap().unwrap();
/// let second = registry.resolve(&["/projects/./demo"]).unwrap().unwrap();
/// assert!(first.same_node(&second));
///
/// // A location that denotes nothing is a normal outcome, not an error.
/// assert!(registry.resolve(&["/projects/missing"]).unwrap().is_none());
/// ```
#[derive(Clone)]
pub struct PathRegistry {
    inner: Arc<RegistryShared>,
}

impl Default for PathRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PathRegistry {
    /// Create a registry over the real filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::with_filesystem(Arc::new(OsFilesystem::new()))
    }

    /// Create a registry over an injected filesystem adapter.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use pathkin::{PathRegistry, fs::MemFilesystem};
    ///
    /// let registry = PathRegistry::with_filesystem(Arc::new(MemFilesystem::new()));
    /// assert_eq!(registry.interned_count(), 0);
    /// ```
    #[must_use]
    pub fn with_filesystem(fs: Arc<dyn Filesystem>) -> Self {
        Self {
            inner: Arc::new(RegistryShared {
                fs,
                cache: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// The adapter this registry resolves through.
    pub(crate) fn fs(&self) -> &Arc<dyn Filesystem> {
        &self.inner.fs
    }

    /// Number of absolute nodes currently interned.
    #[must_use]
    pub fn interned_count(&self) -> usize {
        self.lock_cache().len()
    }

    /// Resolve raw segments to the canonical absolute node, interning it.
    ///
    /// Joins the segments, canonicalizes, classifies, and get-or-creates
    /// the node keyed by the canonical path. `Ok(None)` means the canonical
    /// location denotes neither a directory nor a file — a normal outcome
    /// of factory lookup.
    ///
    /// # Errors
    ///
    /// Propagates adapter failures (normalization, permission, I/O).
    pub fn resolve<P: AsRef<Path>>(&self, segments: &[P]) -> Result<Option<PathNode>> {
        let joined = self.join_all(segments);
        self.resolve_joined(&joined)
    }

    /// Resolution entry point for already-joined text.
    pub(crate) fn resolve_joined(&self, joined: &Path) -> Result<Option<PathNode>> {
        let fs = &self.inner.fs;
        let canonical = fs.canonicalize(joined)?;

        let class = match fs.classify(&canonical)? {
            Classification::Directory => ObjectClass::Directory,
            Classification::File => ObjectClass::File,
            Classification::Absent => return Ok(None),
        };

        let (parent, name) = fs.split(&canonical)?;
        // The root split already degenerates to no parent; filtering keeps
        // a misbehaving adapter from ever producing a self-parenting node.
        let parent = parent.filter(|p| p.as_path() != canonical.as_path());

        let mut cache = self.lock_cache();
        let node = cache
            .entry(canonical.clone())
            .or_insert_with(|| {
                log::debug!("interning {} ({class:?})", canonical.display());
                Arc::new(NodeInner::absolute(name, class, parent))
            })
            .clone();
        drop(cache);

        Ok(Some(PathNode::from_inner(node, self.clone())))
    }

    /// Resolve for internal parent links, returning the interned payload.
    pub(crate) fn resolve_interned(&self, path: &Path) -> Result<Option<Arc<NodeInner>>> {
        Ok(self.resolve_joined(path)?.map(|node| node.inner))
    }

    /// Construct a fresh, uncached relative node from raw segments.
    ///
    /// With a `start` node the joined text is first rebased onto it via
    /// the adapter's relative-form rule (the result may climb with `..`).
    /// The chain is built eagerly, root-first, and bypasses the interning
    /// cache entirely.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotApplicable`] when `start` is itself relative —
    /// no shared origin can be assumed — and propagates adapter failures.
    pub fn relpath<P: AsRef<Path>>(
        &self,
        segments: &[P],
        start: Option<&PathNode>,
    ) -> Result<PathNode> {
        let joined = self.join_all(segments);

        let text = match start {
            Some(anchor) if anchor.is_relative() => {
                return Err(Error::NotApplicable {
                    details: format!(
                        "cannot derive a relative form against relative start '{anchor}'"
                    ),
                })
            }
            Some(anchor) => self.inner.fs.relative_to(&joined, &anchor.raw_path())?,
            None => joined,
        };

        self.relative_node(&text)
    }

    /// Build the eager relative chain for already-derived text.
    pub(crate) fn relative_node(&self, path: &Path) -> Result<PathNode> {
        let mut chain: Option<Arc<NodeInner>> = None;
        for component in path.components() {
            let name = match component {
                Component::CurDir => continue,
                Component::ParentDir => "..".to_string(),
                Component::RootDir | Component::Prefix(_) | Component::Normal(_) => component
                    .as_os_str()
                    .to_str()
                    .ok_or_else(|| Error::InvalidPath {
                        path: path.to_path_buf(),
                        reason: "path segment contains invalid UTF-8".to_string(),
                    })?
                    .to_string(),
            };
            chain = Some(Arc::new(NodeInner::relative(name, chain)));
        }

        // All-dot or empty input collapses to the neutral locator.
        let inner =
            chain.unwrap_or_else(|| Arc::new(NodeInner::relative(".".to_string(), None)));
        Ok(PathNode::from_inner(inner, self.clone()))
    }

    fn join_all<P: AsRef<Path>>(&self, segments: &[P]) -> PathBuf {
        let mut joined = PathBuf::new();
        for segment in segments {
            joined = self.inner.fs.join(&joined, segment.as_ref());
        }
        joined
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, Arc<NodeInner>>> {
        // The cache holds only constructed values; a panic elsewhere
        // cannot leave it half-written.
        self.inner.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
