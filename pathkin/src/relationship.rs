//! Hierarchy relationship checking.
//!
//! A thin classification layer over the intersection operator: how do two
//! nodes relate inside the tree?

use crate::error::Result;
use crate::node::PathNode;

/// Relationship between two nodes in the hierarchy.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use pathkin::{PathRegistry, Relation, fs::MemFilesystem};
///
/// let fs = MemFilesystem::new().with_dir("/home/user/project");
/// let registry = PathRegistry::with_filesystem(Arc::new(fs));
/// let home = registry.resolve(&["/home/user"]).unwrap().unwrap();
/// let project = registry.resolve(&["/home/user/project"]).unwrap().unwrap();
///
/// assert_eq!(Relation::between(&home, &project).unwrap(), Relation::Ancestor);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// The first node is an ancestor of the second.
    Ancestor,
    /// The first node is a descendant of the second.
    Descendant,
    /// The two nodes denote the same location.
    Same,
    /// Neither contains the other.
    Unrelated,
}

impl Relation {
    /// Classify how `first` relates to `second`.
    ///
    /// Derived from the intersection operator, so absolute nodes compare
    /// by interned identity and relative nodes structurally.
    ///
    /// # Errors
    ///
    /// Propagates adapter failures encountered while resolving chains.
    pub fn between(first: &PathNode, second: &PathNode) -> Result<Self> {
        if first == second {
            return Ok(Self::Same);
        }
        match first.intersection(second)? {
            Some(common) if common == *first => Ok(Self::Ancestor),
            Some(common) if common == *second => Ok(Self::Descendant),
            _ => Ok(Self::Unrelated),
        }
    }

    /// Whether the relationship is hierarchical (anything but unrelated).
    #[must_use]
    pub fn is_hierarchical(&self) -> bool {
        !matches!(self, Self::Unrelated)
    }

    /// Whether `node` lies within `directory` (descendant or same).
    ///
    /// # Errors
    ///
    /// Propagates adapter failures encountered while resolving chains.
    pub fn is_within(node: &PathNode, directory: &PathNode) -> Result<bool> {
        Ok(matches!(
            Self::between(node, directory)?,
            Self::Descendant | Self::Same
        ))
    }

    /// Whether `node` contains `other` (ancestor or same).
    ///
    /// # Errors
    ///
    /// Propagates adapter failures encountered while resolving chains.
    pub fn contains(node: &PathNode, other: &PathNode) -> Result<bool> {
        Ok(matches!(
            Self::between(node, other)?,
            Self::Ancestor | Self::Same
        ))
    }
}
