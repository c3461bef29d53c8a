//! Integration tests for registry resolution and interning.

mod common;

use std::sync::Arc;

use pathkin::fs::OsFilesystem;
use pathkin::{NodeKind, PathRegistry};

use common::sample_registry;

#[test]
fn test_resolution_returns_interned_nodes() {
    let reg = sample_registry();

    let once = reg.resolve(&["/abcd/efg/hi"]).unwrap().unwrap();
    let again = reg.resolve(&["/abcd/efg/hi"]).unwrap().unwrap();
    assert!(once.same_node(&again));
    assert_eq!(once, again);
}

#[test]
fn test_multi_segment_resolution_matches_direct() {
    let reg = sample_registry();

    let direct = reg.resolve(&["/abcd/efg/hi/p1"]).unwrap().unwrap();
    let pieces = reg.resolve(&["/abcd", "efg", "hi/p1"]).unwrap().unwrap();
    assert!(direct.same_node(&pieces));
}

#[test]
fn test_absent_path_resolves_to_none() {
    let reg = sample_registry();
    assert!(reg.resolve(&["/no/such/place"]).unwrap().is_none());
}

#[test]
fn test_parents_share_instances_with_direct_resolution() {
    let reg = sample_registry();

    let deep = reg.resolve(&["/abcd/efg/hi/p1"]).unwrap().unwrap();
    let mid = reg.resolve(&["/abcd/efg"]).unwrap().unwrap();

    let via_parents = deep
        .parent()
        .unwrap()
        .unwrap()
        .parent()
        .unwrap()
        .unwrap();
    assert!(via_parents.same_node(&mid));
}

#[test]
fn test_hierarchy_runs_root_to_node() {
    let reg = sample_registry();

    let deep = reg.resolve(&["/abcd/efg/hi/p1"]).unwrap().unwrap();
    let chain = deep.hierarchy().unwrap();
    let names: Vec<&str> = chain.iter().map(pathkin::PathNode::name).collect();
    assert_eq!(names, vec!["/", "abcd", "efg", "hi", "p1"]);
    assert!(chain.last().unwrap().same_node(&deep));
}

#[test]
fn test_classification_survives_into_nodes() {
    let reg = sample_registry();

    let dir = reg.resolve(&["/abcd"]).unwrap().unwrap();
    let file = reg.resolve(&["/abcd/notes.txt"]).unwrap().unwrap();
    assert!(dir.is_dir());
    assert!(file.is_file());
    assert_eq!(dir.kind(), NodeKind::Absolute);
}

#[test]
fn test_relpath_builds_relative_chain() {
    let reg = sample_registry();

    let start = reg.resolve(&["/abcd"]).unwrap().unwrap();
    let rel = reg
        .relpath(&["/abcd/efg/hi/p1"], Some(&start))
        .unwrap();
    assert!(rel.is_relative());
    assert_eq!(rel.raw_string(), "efg/hi/p1");

    let chain = rel.hierarchy().unwrap();
    let names: Vec<&str> = chain.iter().map(pathkin::PathNode::name).collect();
    assert_eq!(names, vec!["efg", "hi", "p1"]);
}

#[test]
fn test_relpath_climbs_with_parent_segments() {
    let reg = sample_registry();

    let start = reg.resolve(&["/foo/bar"]).unwrap().unwrap();
    let rel = reg.relpath(&["/abcd/efg"], Some(&start)).unwrap();
    assert_eq!(rel.raw_string(), "../../abcd/efg");
}

#[test]
fn test_relpath_rejects_relative_start() {
    let reg = sample_registry();

    let start = reg.relpath(&["efg/hi"], None).unwrap();
    let err = reg.relpath(&["/abcd"], Some(&start)).unwrap_err();
    assert!(matches!(err, pathkin::Error::NotApplicable { .. }));
}

#[test]
fn test_registries_do_not_share_caches() {
    let first = sample_registry();
    let second = sample_registry();

    let a = first.resolve(&["/abcd"]).unwrap().unwrap();
    let b = second.resolve(&["/abcd"]).unwrap().unwrap();
    // Equal by location, distinct by instance.
    assert_eq!(a, b);
    assert!(!a.same_node(&b));
}

#[test]
fn test_os_filesystem_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let root = std::fs::canonicalize(dir.path()).unwrap();
    std::fs::create_dir_all(root.join("proj/src")).unwrap();
    std::fs::write(root.join("proj/readme.md"), "alpha\nbeta\n").unwrap();

    let reg = PathRegistry::with_filesystem(Arc::new(OsFilesystem::new()));

    let src = reg.resolve(&[root.join("proj/src")]).unwrap().unwrap();
    assert!(src.is_dir());
    assert_eq!(src.name(), "src");

    let proj = reg.resolve(&[root.join("proj")]).unwrap().unwrap();
    assert!(src.parent().unwrap().unwrap().same_node(&proj));

    let readme = reg.resolve(&[root.join("proj/readme.md")]).unwrap().unwrap();
    assert!(readme.is_file());

    assert!(reg.resolve(&[root.join("missing")]).unwrap().is_none());
}
