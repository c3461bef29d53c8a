//! Lazy, single-pass node iteration.
//!
//! Iterating a directory node yields its immediate children as nodes
//! (constructed through the registry); iterating a file node yields its
//! text lines; a relative node has no children by definition and yields
//! nothing. No adapter call happens before the first element is
//! requested, and a failure while producing an element surfaces at that
//! point, not eagerly.
//!
//! The sequence is single-pass and non-restartable: consuming it again
//! requires calling [`PathNode::entries`] again.

use std::path::PathBuf;

use crate::error::Result;
use crate::fs::TextStream;
use crate::node::{ObjectClass, PathNode};

/// One element produced while iterating a node.
#[derive(Debug)]
pub enum Entry {
    /// An immediate child of a directory node.
    Child(PathNode),
    /// One text line of a file node.
    Line(String),
}

impl Entry {
    /// The child node, if this entry is one.
    #[must_use]
    pub fn into_child(self) -> Option<PathNode> {
        match self {
            Self::Child(node) => Some(node),
            Self::Line(_) => None,
        }
    }

    /// The text line, if this entry is one.
    #[must_use]
    pub fn into_line(self) -> Option<String> {
        match self {
            Self::Line(line) => Some(line),
            Self::Child(_) => None,
        }
    }
}

enum EntriesState {
    Unstarted,
    Children { base: PathBuf, names: TextStream },
    Lines(TextStream),
    Finished,
}

/// Lazy iterator over a node's entries; see the module docs.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use pathkin::{PathRegistry, fs::MemFilesystem};
///
/// let fs = MemFilesystem::new().with_file("/notes", &["alpha", "beta"]);
/// let registry = PathRegistry::with_filesystem(Arc::new(fs));
/// let notes = registry.resolve(&["/notes"]).unwrap().unwrap();
///
/// let lines: Vec<String> = notes
///     .entries()
///     .map(|entry| entry.unwrap().into_line().unwrap())
///     .collect();
/// assert_eq!(lines, vec!["alpha", "beta"]);
/// ```
pub struct Entries {
    node: PathNode,
    state: EntriesState,
}

impl PathNode {
    /// Begin lazy iteration over this node's entries.
    #[must_use]
    pub fn entries(&self) -> Entries {
        Entries {
            node: self.clone(),
            state: EntriesState::Unstarted,
        }
    }
}

impl Iterator for Entries {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.state {
                EntriesState::Unstarted => {
                    let fs = self.node.registry.fs();
                    self.state = match self.node.class() {
                        // Relative nodes have no children by definition.
                        None => EntriesState::Finished,
                        Some(ObjectClass::Directory) => {
                            let base = self.node.raw_path();
                            match fs.list_children(&base) {
                                Ok(names) => EntriesState::Children { base, names },
                                Err(e) => {
                                    self.state = EntriesState::Finished;
                                    return Some(Err(e));
                                }
                            }
                        }
                        Some(ObjectClass::File) => match fs.read_lines(&self.node.raw_path()) {
                            Ok(lines) => EntriesState::Lines(lines),
                            Err(e) => {
                                self.state = EntriesState::Finished;
                                return Some(Err(e));
                            }
                        },
                    };
                }
                EntriesState::Children { base, names } => match names.next() {
                    None => {
                        self.state = EntriesState::Finished;
                        return None;
                    }
                    Some(Err(e)) => return Some(Err(e)),
                    Some(Ok(name)) => {
                        let child = self.node.registry.fs().join(base, name.as_ref());
                        match self.node.registry.resolve_joined(&child) {
                            Ok(Some(node)) => return Some(Ok(Entry::Child(node))),
                            // Vanished between listing and classification;
                            // absent is not an error.
                            Ok(None) => {}
                            Err(e) => return Some(Err(e)),
                        }
                    }
                },
                EntriesState::Lines(lines) => match lines.next() {
                    None => {
                        self.state = EntriesState::Finished;
                        return None;
                    }
                    Some(line) => return Some(line.map(Entry::Line)),
                },
                EntriesState::Finished => return None,
            }
        }
    }
}
