//! Path node entities.
//!
//! A [`PathNode`] is one segment in a hierarchy chain, polymorphic over
//! kind: **Absolute** nodes denote a canonical filesystem location and are
//! interned by the registry (one live instance per canonical path);
//! **Relative** nodes are context-dependent, ephemeral and never cached.
//!
//! Nodes are immutable after construction except for two one-time
//! memoizations: the resolved parent link and the root-to-self hierarchy.
//! Both are pure functions of immutable inputs, so redundant concurrent
//! computation is safe and losing a set race is harmless.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::error::Result;
use crate::fs::join_segments;
use crate::registry::PathRegistry;

/// Node kind tag: determines join rules and cache eligibility.
///
/// Absolute nodes are resolvable and interned; Relative nodes depend on an
/// implicit origin, so interning them (or comparing them by identity)
/// would be unsound. They compare structurally instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A canonical, resolvable location. Interned by the registry.
    Absolute,
    /// A context-dependent locator. Fresh on every construction.
    Relative,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute => write!(f, "absolute"),
            Self::Relative => write!(f, "relative"),
        }
    }
}

/// What an interned absolute node resolved to at first lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectClass {
    /// A directory: iteration yields child nodes.
    Directory,
    /// A regular file: iteration yields text lines.
    File,
}

/// The shared, interned payload behind a [`PathNode`] handle.
pub(crate) struct NodeInner {
    pub(crate) name: String,
    pub(crate) kind: NodeKind,
    pub(crate) class: Option<ObjectClass>,
    /// Canonical parent text, not yet resolved to a node. `None` for roots
    /// and for relative nodes (whose chains are built eagerly).
    pub(crate) raw_parent: Option<PathBuf>,
    /// One-time memoized resolved parent. `Some(None)` means "resolved,
    /// and this is a root".
    pub(crate) parent: OnceLock<Option<Arc<NodeInner>>>,
    /// One-time memoized root-to-self chain.
    pub(crate) hierarchy: OnceLock<Vec<Arc<NodeInner>>>,
}

impl NodeInner {
    /// Payload for an interned absolute node. The parent stays textual
    /// until first access.
    pub(crate) fn absolute(name: String, class: ObjectClass, raw_parent: Option<PathBuf>) -> Self {
        Self {
            name,
            kind: NodeKind::Absolute,
            class: Some(class),
            raw_parent,
            parent: OnceLock::new(),
            hierarchy: OnceLock::new(),
        }
    }

    /// Payload for one link of an eagerly built relative chain.
    pub(crate) fn relative(name: String, parent: Option<Arc<NodeInner>>) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(parent);
        Self {
            name,
            kind: NodeKind::Relative,
            class: None,
            raw_parent: None,
            parent: cell,
            hierarchy: OnceLock::new(),
        }
    }

    /// Raw textual form: parent's raw form joined with `name`.
    ///
    /// Uses the memoized parent when available and the unresolved parent
    /// text otherwise, so this never triggers resolution or I/O.
    pub(crate) fn raw_path(&self) -> PathBuf {
        let parent: Option<PathBuf> = match self.parent.get() {
            Some(Some(resolved)) => Some(resolved.raw_path()),
            Some(None) => None,
            None => self.raw_parent.clone(),
        };
        match parent {
            Some(base) => join_segments(&[&base, Path::new(&self.name)]),
            None => PathBuf::from(&self.name),
        }
    }
}

/// One segment in a hierarchy chain; a cheap-to-clone shared handle.
///
/// Obtained from a [`PathRegistry`], never constructed directly. Two
/// absolute handles for the same canonical location share one allocation;
/// [`PathNode::same_node`] observes that identity.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use pathkin::{PathRegistry, fs::MemFilesystem};
///
/// let fs = MemFilesystem::new().with_dir("/a/b");
/// let registry = PathRegistry::with_filesystem(Arc::new(fs));
///
/// let node = registry.resolve(&["/a/b"]).unwrap().unwrap();
/// assert_eq!(node.name(), "b");
/// assert_eq!(node.hierarchy().unwrap().len(), 3); // "/", "a", "b"
/// ```
pub struct PathNode {
    pub(crate) inner: Arc<NodeInner>,
    pub(crate) registry: PathRegistry,
}

impl Clone for PathNode {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            registry: self.registry.clone(),
        }
    }
}

impl PathNode {
    pub(crate) fn from_inner(inner: Arc<NodeInner>, registry: PathRegistry) -> Self {
        Self { inner, registry }
    }

    /// The final path segment, or the root sentinel for a root node.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The node kind tag.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.inner.kind
    }

    /// What the location resolved to; `None` for relative nodes.
    #[must_use]
    pub fn class(&self) -> Option<ObjectClass> {
        self.inner.class
    }

    /// Whether this node denotes a directory.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.inner.class == Some(ObjectClass::Directory)
    }

    /// Whether this node denotes a regular file.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.inner.class == Some(ObjectClass::File)
    }

    /// Whether this is a relative node.
    #[must_use]
    pub fn is_relative(&self) -> bool {
        self.inner.kind == NodeKind::Relative
    }

    /// Identity check: do the two handles share one interned allocation?
    ///
    /// This is the comparison the interning guarantee is about; for value
    /// equality use `==`.
    #[must_use]
    pub fn same_node(&self, other: &PathNode) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// The resolved parent node, or `None` for a root.
    ///
    /// A textual parent is resolved through the registry on first access
    /// and memoized. A parent that no longer denotes any object collapses
    /// to `None`, turning this node into a root.
    ///
    /// # Errors
    ///
    /// Propagates adapter failures encountered during resolution.
    pub fn parent(&self) -> Result<Option<PathNode>> {
        Ok(self
            .parent_arc()?
            .map(|inner| PathNode::from_inner(inner, self.registry.clone())))
    }

    fn parent_arc(&self) -> Result<Option<Arc<NodeInner>>> {
        if let Some(cached) = self.inner.parent.get() {
            return Ok(cached.clone());
        }
        let resolved = match &self.inner.raw_parent {
            Some(text) => {
                log::trace!("resolving parent {} of {}", text.display(), self.name());
                self.registry.resolve_interned(text)?
            }
            None => None,
        };
        // Losing this race is fine; both sides computed the same value.
        let _ = self.inner.parent.set(resolved.clone());
        Ok(resolved)
    }

    /// The memoized root-to-self ancestor chain.
    ///
    /// Has length 1 for a root, and `parent().hierarchy().len() + 1`
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Propagates adapter failures encountered while resolving parents.
    pub fn hierarchy(&self) -> Result<Vec<PathNode>> {
        Ok(self
            .hierarchy_arcs()?
            .into_iter()
            .map(|inner| PathNode::from_inner(inner, self.registry.clone()))
            .collect())
    }

    fn hierarchy_arcs(&self) -> Result<Vec<Arc<NodeInner>>> {
        if let Some(cached) = self.inner.hierarchy.get() {
            return Ok(cached.clone());
        }
        let mut chain = match self.parent()? {
            Some(parent) => parent.hierarchy_arcs()?,
            None => Vec::new(),
        };
        chain.push(Arc::clone(&self.inner));
        let _ = self.inner.hierarchy.set(chain.clone());
        Ok(chain)
    }

    /// The display form: hierarchy segment names joined by the platform
    /// rule. Degenerates to `name` for a root.
    ///
    /// # Errors
    ///
    /// Propagates adapter failures encountered while resolving the chain.
    pub fn display_string(&self) -> Result<String> {
        let chain = self.hierarchy_arcs()?;
        let mut joined = PathBuf::new();
        for link in &chain {
            joined.push(&link.name);
        }
        Ok(joined.to_string_lossy().into_owned())
    }

    /// The raw textual form handed to the filesystem adapter for I/O.
    ///
    /// Never performs resolution or I/O itself.
    #[must_use]
    pub fn raw_path(&self) -> PathBuf {
        self.inner.raw_path()
    }

    /// [`PathNode::raw_path`] as a string.
    #[must_use]
    pub fn raw_string(&self) -> String {
        self.inner.raw_path().to_string_lossy().into_owned()
    }

    /// Whether this node is a bare no-op locator: `""`, `"."` or `".."`
    /// with no parent. Subtracting one of these is the identity.
    #[must_use]
    pub fn is_noop_marker(&self) -> bool {
        let rootless = match self.inner.parent.get() {
            Some(parent) => parent.is_none(),
            None => self.inner.raw_parent.is_none(),
        };
        rootless && matches!(self.name(), "" | "." | "..")
    }
}

impl PartialEq for PathNode {
    /// Canonical-path equality for absolute nodes (which, thanks to
    /// interning, coincides with identity within one registry); structural
    /// segment equality for relative nodes. Never address-based.
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        self.kind() == other.kind() && self.inner.raw_path() == other.inner.raw_path()
    }
}

impl Eq for PathNode {}

impl Hash for PathNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        self.inner.raw_path().hash(state);
    }
}

impl fmt::Debug for PathNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathNode")
            .field("name", &self.inner.name)
            .field("kind", &self.inner.kind)
            .field("class", &self.inner.class)
            .field("raw", &self.inner.raw_path())
            .finish()
    }
}

impl fmt::Display for PathNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.raw_path().display())
    }
}
