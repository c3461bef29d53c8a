//! Property-based tests for the node algebra.
//!
//! Note: the normalize module already has property tests for dot
//! resolution. This module focuses on interning identity and the
//! operator laws, driven through an in-memory filesystem.

use crate::fs::MemFilesystem;
use crate::registry::PathRegistry;
use proptest::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

// Strategy for generating path-like strings
fn path_component_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,12}"
}

fn component_chain_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(path_component_strategy(), 1..6)
}

fn absolute_path(parts: &[String]) -> PathBuf {
    let mut path = PathBuf::from("/");
    for part in parts {
        path.push(part);
    }
    path
}

fn registry_with(path: &PathBuf) -> PathRegistry {
    let fs = MemFilesystem::new().with_dir(path);
    PathRegistry::with_filesystem(Arc::new(fs))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 2000,
        .. ProptestConfig::default()
    })]

    // Resolving the same location twice yields the same interned node.
    #[test]
    fn resolution_is_interned(parts in component_chain_strategy()) {
        let path = absolute_path(&parts);
        let reg = registry_with(&path);
        let first = reg.resolve(&[&path]).unwrap().unwrap();
        let second = reg.resolve(&[&path]).unwrap().unwrap();
        prop_assert!(first.same_node(&second));
    }

    // A node's hierarchy is its parent's hierarchy plus itself, so the
    // chain length equals the component count plus the root.
    #[test]
    fn hierarchy_length_matches_depth(parts in component_chain_strategy()) {
        let path = absolute_path(&parts);
        let reg = registry_with(&path);
        let node = reg.resolve(&[&path]).unwrap().unwrap();
        let chain = node.hierarchy().unwrap();
        prop_assert_eq!(chain.len(), parts.len() + 1);

        let parent = node.parent().unwrap().unwrap();
        let parent_chain = parent.hierarchy().unwrap();
        prop_assert_eq!(parent_chain.len() + 1, chain.len());
    }

    // Subtracting nothing is the identity.
    #[test]
    fn difference_with_none_is_identity(parts in component_chain_strategy()) {
        let path = absolute_path(&parts);
        let reg = registry_with(&path);
        let node = reg.resolve(&[&path]).unwrap().unwrap();
        let result = node.difference(None).unwrap();
        prop_assert!(result.same_node(&node));
    }

    // Subtracting a node from itself leaves the neutral relative node.
    #[test]
    fn difference_with_self_is_neutral(parts in component_chain_strategy()) {
        let path = absolute_path(&parts);
        let reg = registry_with(&path);
        let node = reg.resolve(&[&path]).unwrap().unwrap();
        let result = node.difference(Some(&node)).unwrap();
        prop_assert!(result.is_relative());
        prop_assert_eq!(result.raw_string(), ".");
    }

    // Intersection with an ancestor hands back that ancestor, in either
    // argument order.
    #[test]
    fn intersection_with_ancestor_is_ancestor(
        parts in component_chain_strategy(),
        cut in 0..6usize,
    ) {
        let path = absolute_path(&parts);
        let reg = registry_with(&path);
        let node = reg.resolve(&[&path]).unwrap().unwrap();

        let ancestor_path = absolute_path(&parts[..cut.min(parts.len())]);
        let ancestor = reg.resolve(&[&ancestor_path]).unwrap().unwrap();

        let forward = node.intersection(&ancestor).unwrap().unwrap();
        let backward = ancestor.intersection(&node).unwrap().unwrap();
        prop_assert!(forward.same_node(&ancestor));
        prop_assert!(backward.same_node(&ancestor));
    }

    // Concatenating an ancestor with the subtracted remainder restores
    // the original node.
    #[test]
    fn concat_inverts_difference(
        prefix in component_chain_strategy(),
        suffix in component_chain_strategy(),
    ) {
        let mut parts = prefix.clone();
        parts.extend(suffix);
        let path = absolute_path(&parts);
        let reg = registry_with(&path);
        let node = reg.resolve(&[&path]).unwrap().unwrap();

        let ancestor_path = absolute_path(&prefix);
        let ancestor = reg.resolve(&[&ancestor_path]).unwrap().unwrap();

        let remainder = node.difference(Some(&ancestor)).unwrap();
        prop_assert!(remainder.is_relative());

        let rebuilt = ancestor.concat(&remainder).unwrap().unwrap();
        prop_assert!(rebuilt.same_node(&node));
    }

    // Relative nodes with the same segments compare equal structurally
    // even though each call builds a fresh chain.
    #[test]
    fn relative_equality_is_structural(parts in component_chain_strategy()) {
        let fs = MemFilesystem::new();
        let reg = PathRegistry::with_filesystem(Arc::new(fs));
        let rel_path = parts.join("/");
        let first = reg.relpath(&[&rel_path], None).unwrap();
        let second = reg.relpath(&[&rel_path], None).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert!(!first.same_node(&second));
    }
}
