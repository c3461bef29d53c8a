//! Common test utilities for integration tests.
//!
//! This module provides fixture builders and an instrumented adapter for
//! testing the pathkin library.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pathkin::fs::{Classification, Filesystem, MemFilesystem, TextStream};
use pathkin::{PathRegistry, Result};

/// Builds the standard in-memory tree used across the integration tests.
///
/// Layout:
/// - `/abcd/efg/hi/p1` (directories)
/// - `/a/b/c/d` (directories)
/// - `/foo/bar` (directories)
/// - `/abcd/notes.txt` (file with three lines)
#[allow(dead_code)]
pub fn sample_filesystem() -> MemFilesystem {
    MemFilesystem::new()
        .with_dir("/abcd/efg/hi/p1")
        .with_dir("/a/b/c/d")
        .with_dir("/foo/bar")
        .with_file("/abcd/notes.txt", &["first line", "second line", "third"])
}

/// A registry over [`sample_filesystem`].
#[allow(dead_code)]
pub fn sample_registry() -> PathRegistry {
    PathRegistry::with_filesystem(Arc::new(sample_filesystem()))
}

/// An adapter wrapper that counts I/O calls, for asserting laziness.
///
/// Textual operations (`join`, `split`, `relative_to`) are not counted;
/// only the methods that would touch a real filesystem are.
#[allow(dead_code)]
pub struct CountingFilesystem {
    inner: MemFilesystem,
    classify_calls: AtomicUsize,
    list_calls: AtomicUsize,
    read_calls: AtomicUsize,
}

#[allow(dead_code)]
impl CountingFilesystem {
    pub fn new(inner: MemFilesystem) -> Self {
        Self {
            inner,
            classify_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
            read_calls: AtomicUsize::new(0),
        }
    }

    pub fn classify_calls(&self) -> usize {
        self.classify_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn read_calls(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst)
    }
}

impl Filesystem for CountingFilesystem {
    fn classify(&self, path: &Path) -> Result<Classification> {
        self.classify_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.classify(path)
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        self.inner.canonicalize(path)
    }

    fn list_children(&self, path: &Path) -> Result<TextStream> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list_children(path)
    }

    fn read_lines(&self, path: &Path) -> Result<TextStream> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.read_lines(path)
    }
}
