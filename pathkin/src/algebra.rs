//! Hierarchy algebra: difference, intersection and concatenation.
//!
//! All three operators are built on the memoized hierarchy chain and on
//! node equality (canonical identity for absolute nodes, structural
//! equality for relative ones). Difference and intersection never fail for
//! unrelated operands — "no relationship" is a neutral result, not an
//! error.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::node::{NodeKind, PathNode};

impl PathNode {
    /// Deepest common ancestor of the two hierarchies.
    ///
    /// Walks both chains pairwise from the root. `Ok(None)` means even the
    /// roots differ; otherwise the result is the last matched ancestor
    /// (the shorter chain's tip when one contains the other). The result
    /// is order-insensitive in value.
    ///
    /// # Errors
    ///
    /// Propagates adapter failures encountered while resolving chains.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use pathkin::{PathRegistry, fs::MemFilesystem};
    ///
    /// let fs = MemFilesystem::new().with_dir("/a/b/c").with_dir("/a/b/d");
    /// let registry = PathRegistry::with_filesystem(Arc::new(fs));
    /// let c = registry.resolve(&["/a/b/c"]).unwrap().unwrap();
    /// let d = registry.resolve(&["/a/b/d"]).unwrap().unwrap();
    ///
    /// let common = c.intersection(&d).unwrap().unwrap();
    /// assert_eq!(common.raw_string(), "/a/b");
    /// ```
    pub fn intersection(&self, other: &PathNode) -> Result<Option<PathNode>> {
        let mine = self.hierarchy()?;
        let theirs = other.hierarchy()?;

        let mut deepest = None;
        for (a, b) in mine.iter().zip(theirs.iter()) {
            if a != b {
                break;
            }
            deepest = Some(a.clone());
        }
        Ok(deepest)
    }

    /// What remains of `self` once `other`'s overlap is removed.
    ///
    /// - `None` or a bare no-op locator (`""`, `"."`, `".."`) subtracts
    ///   nothing.
    /// - An absolute `other` is matched as a root-first prefix: when it is
    ///   an ancestor-or-equal of `self`, the remaining segments come back
    ///   as a fresh relative node (the neutral `.` when equal); otherwise
    ///   `self` is returned unchanged.
    /// - A relative `other` is matched trailing-first, peeling one segment
    ///   from each side per step until it is exhausted (the remaining
    ///   prefix of `self` comes back) or a mismatch occurs (`self`
    ///   unchanged — no overlap is a valid, silent outcome).
    ///
    /// # Errors
    ///
    /// Propagates adapter failures encountered while resolving chains.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use pathkin::{PathRegistry, fs::MemFilesystem};
    ///
    /// let fs = MemFilesystem::new().with_dir("/abcd/efg/hi/p1").with_dir("/foo/bar");
    /// let registry = PathRegistry::with_filesystem(Arc::new(fs));
    /// let deep = registry.resolve(&["/abcd/efg/hi/p1"]).unwrap().unwrap();
    ///
    /// let ancestor = registry.resolve(&["/abcd"]).unwrap().unwrap();
    /// assert_eq!(deep.difference(Some(&ancestor)).unwrap().raw_string(), "efg/hi/p1");
    ///
    /// let unrelated = registry.resolve(&["/foo/bar"]).unwrap().unwrap();
    /// assert!(deep.difference(Some(&unrelated)).unwrap().same_node(&deep));
    /// ```
    pub fn difference(&self, other: Option<&PathNode>) -> Result<PathNode> {
        let Some(other) = other else {
            return Ok(self.clone());
        };
        if other.is_noop_marker() {
            return Ok(self.clone());
        }

        match other.kind() {
            NodeKind::Absolute => self.subtract_prefix(other),
            NodeKind::Relative => self.subtract_suffix(other),
        }
    }

    fn subtract_prefix(&self, other: &PathNode) -> Result<PathNode> {
        let mine = self.hierarchy()?;
        let theirs = other.hierarchy()?;

        if theirs.len() > mine.len()
            || mine.iter().zip(theirs.iter()).any(|(a, b)| a != b)
        {
            log::trace!("no prefix overlap between {self} and {other}");
            return Ok(self.clone());
        }

        let mut remainder = PathBuf::new();
        for link in &mine[theirs.len()..] {
            remainder.push(link.name());
        }
        self.registry.relative_node(&remainder)
    }

    fn subtract_suffix(&self, other: &PathNode) -> Result<PathNode> {
        let mut remaining = Some(self.clone());
        let mut pending = Some(other.clone());

        while let Some(expected) = pending {
            let Some(current) = remaining else {
                // `other` is longer than `self`; nothing to peel.
                return Ok(self.clone());
            };
            if current.name() != expected.name() {
                return Ok(self.clone());
            }
            remaining = current.parent()?;
            pending = expected.parent()?;
        }

        match remaining {
            Some(prefix) => Ok(prefix),
            None => self.registry.relative_node(std::path::Path::new(".")),
        }
    }

    /// Concatenate, defined only when exactly one operand is relative.
    ///
    /// The base (`self`) picks the factory: an absolute base hands the
    /// textual join to the interning registry, so `Ok(None)` means the
    /// joined location denotes nothing; a relative base constructs a fresh
    /// relative node and always yields `Ok(Some(..))`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] when both operands are absolute
    /// or both are relative; propagates adapter failures otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use pathkin::{PathRegistry, fs::MemFilesystem};
    ///
    /// let fs = MemFilesystem::new().with_dir("/a/b/c/d");
    /// let registry = PathRegistry::with_filesystem(Arc::new(fs));
    /// let base = registry.resolve(&["/a/b"]).unwrap().unwrap();
    /// let tail = registry.relpath(&["c/d"], None).unwrap();
    ///
    /// let joined = base.concat(&tail).unwrap().unwrap();
    /// assert_eq!(joined.raw_string(), "/a/b/c/d");
    /// ```
    pub fn concat(&self, other: &PathNode) -> Result<Option<PathNode>> {
        if self.kind() == other.kind() {
            return Err(Error::InvalidOperation {
                details: format!(
                    "cannot concatenate two {} nodes; exactly one operand must be relative",
                    self.kind()
                ),
            });
        }

        let joined = self
            .registry
            .fs()
            .join(&self.raw_path(), &other.raw_path());

        match self.kind() {
            NodeKind::Absolute => self.registry.resolve_joined(&joined),
            NodeKind::Relative => self.registry.relative_node(&joined).map(Some),
        }
    }
}
