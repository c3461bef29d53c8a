#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # pathkin
//!
//! A library for treating filesystem paths as interned hierarchy nodes
//! with set-like operators.
//!
//! Resolving a path through a [`PathRegistry`] produces a [`PathNode`]:
//! one shared instance per canonical location, so two resolutions of the
//! same directory hand back the same node. Nodes know their place in the
//! hierarchy and support difference, intersection, and concatenation, as
//! well as lazy iteration over children or lines.
//!
//! All filesystem access goes through the [`fs::Filesystem`] trait, so
//! the same algebra runs against the real OS tree ([`fs::OsFilesystem`])
//! or a scripted in-memory one ([`fs::MemFilesystem`]).
//!
//! ## Core Types
//!
//! - [`PathRegistry`]: interning resolver, the only way to mint nodes
//! - [`PathNode`]: one location in the hierarchy, absolute or relative
//! - [`Relation`]: ancestor/descendant classification of two nodes
//! - [`Entry`] and [`Entries`]: lazy per-node iteration
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use std::sync::Arc;
//! use pathkin::{PathRegistry, fs::MemFilesystem};
//!
//! let fs = MemFilesystem::new().with_dir("/home/user/project/src");
//! let registry = PathRegistry::with_filesystem(Arc::new(fs));
//!
//! let src = registry.resolve(&["/home/user/project/src"]).unwrap().unwrap();
//! let home = registry.resolve(&["/home/user"]).unwrap().unwrap();
//!
//! // Same location, same node.
//! let again = registry.resolve(&["/home/user", "project/src"]).unwrap().unwrap();
//! assert!(src.same_node(&again));
//!
//! // Subtracting an ancestor leaves the relative remainder.
//! let remainder = src.difference(Some(&home)).unwrap();
//! assert!(remainder.is_relative());
//! assert_eq!(remainder.raw_string(), "project/src");
//! ```

mod algebra;
pub mod error;
pub mod fs;
pub mod iter;
pub mod node;
pub mod registry;
pub mod relationship;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use iter::{Entries, Entry};
pub use node::{NodeKind, ObjectClass, PathNode};
pub use registry::PathRegistry;
pub use relationship::Relation;
