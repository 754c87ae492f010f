//! Storage backend abstraction for path-addressed hierarchical stores.
//!
//! This module defines the capability contract the catalog consumes. A backend
//! is anything that can answer existence and directory queries, list direct
//! children and remove paths: a local filesystem, an object store with
//! prefix semantics, or the in-memory tree used by tests.
//!
//! ## Path Semantics
//!
//! Paths are opaque `/`-separated strings. Backends never interpret them
//! beyond splitting on the separator; relative and absolute forms are both
//! accepted and passed through unchanged.
//!
//! ## Timeouts
//!
//! The contract defines no timeout or cancellation semantics of its own.
//! Remote backends apply their own limits and report them as errors.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Error, Result};
use crate::path;

/// Storage backend trait for hierarchical stores.
///
/// All backends (local filesystem, memory) implement this trait. Backends are
/// shared between the catalog and its artefacts as `Arc<dyn StorageBackend>`.
#[async_trait]
pub trait StorageBackend: Send + Sync + 'static {
    /// Returns whether anything (file or directory) exists at `path`.
    async fn exists(&self, path: &str) -> Result<bool>;

    /// Lists the direct children of a directory as full paths.
    ///
    /// Returns `Error::NotFound` if the directory doesn't exist.
    ///
    /// **Ordering**: Results are returned in arbitrary order that may vary between
    /// backends and invocations. Callers requiring deterministic order should sort
    /// the results.
    async fn list(&self, path: &str) -> Result<Vec<String>>;

    /// Returns whether `path` is a directory.
    ///
    /// Returns `false` if nothing exists at `path`.
    async fn is_directory(&self, path: &str) -> Result<bool>;

    /// Removes a file or directory.
    ///
    /// Returns `Error::NotFound` if nothing exists at `path`.
    /// Returns `Error::PreconditionFailed` if `path` is a non-empty directory
    /// and `recursive` is false.
    async fn remove(&self, path: &str, recursive: bool) -> Result<()>;

    /// Creates a directory and any missing parents.
    ///
    /// Succeeds if the directory already exists.
    /// Returns `Error::PreconditionFailed` if a file occupies `path` or one of
    /// its parents.
    async fn create_dir(&self, path: &str) -> Result<()>;
}

/// In-memory storage backend for testing.
///
/// Thread-safe via `RwLock`. Not suitable for production.
/// Directories are explicit entries; writing a file creates its parents.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    nodes: Arc<RwLock<BTreeMap<String, Node>>>,
}

#[derive(Debug, Clone)]
enum Node {
    Directory,
    File(Bytes),
}

impl MemoryBackend {
    /// Creates a new empty memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a file, creating missing parent directories.
    ///
    /// # Errors
    ///
    /// Returns `Error::PreconditionFailed` if a directory occupies `path` or a
    /// file occupies one of its parents.
    pub fn put_file(&self, path: &str, data: impl Into<Bytes>) -> Result<()> {
        let path = path::normalize(path);
        let mut nodes = self.write()?;

        if matches!(nodes.get(path), Some(Node::Directory)) {
            return Err(Error::precondition(format!(
                "cannot write file over directory: {path}"
            )));
        }
        if let Some(parent) = path::parent(path) {
            insert_directories(&mut nodes, parent)?;
        }
        nodes.insert(path.to_string(), Node::File(data.into()));
        drop(nodes);
        Ok(())
    }

    /// Creates a directory and any missing parents.
    ///
    /// Synchronous counterpart of [`StorageBackend::create_dir`] for seeding
    /// fixtures.
    ///
    /// # Errors
    ///
    /// Returns `Error::PreconditionFailed` if a file occupies `path` or one of
    /// its parents.
    pub fn put_dir(&self, path: &str) -> Result<()> {
        let mut nodes = self.write()?;
        insert_directories(&mut nodes, path)
    }

    /// Reads a file's contents.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no file exists at `path`.
    pub fn read_file(&self, path: &str) -> Result<Bytes> {
        let path = path::normalize(path);
        match self.read()?.get(path) {
            Some(Node::File(data)) => Ok(data.clone()),
            _ => Err(Error::NotFound(format!("file not found: {path}"))),
        }
    }

    /// Returns every stored path, sorted (for debugging and assertions).
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.read()
            .map(|nodes| nodes.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, Node>>> {
        self.nodes.read().map_err(|_| Error::Internal {
            message: "lock poisoned".into(),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, Node>>> {
        self.nodes.write().map_err(|_| Error::Internal {
            message: "lock poisoned".into(),
        })
    }
}

/// Inserts `dir` and every missing ancestor as directories.
fn insert_directories(nodes: &mut BTreeMap<String, Node>, dir: &str) -> Result<()> {
    let mut pending = Vec::new();
    let mut current = Some(path::normalize(dir));

    while let Some(dir) = current {
        match nodes.get(dir) {
            Some(Node::Directory) => break,
            Some(Node::File(_)) => {
                return Err(Error::precondition(format!(
                    "a file occupies directory path: {dir}"
                )));
            }
            None => pending.push(dir.to_string()),
        }
        current = path::parent(dir);
    }

    for dir in pending {
        nodes.insert(dir, Node::Directory);
    }
    Ok(())
}

/// Prefix that every descendant of `dir` starts with.
fn child_prefix(dir: &str) -> String {
    if dir == "/" {
        dir.to_string()
    } else {
        format!("{dir}/")
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.read()?.contains_key(path::normalize(path)))
    }

    async fn list(&self, path: &str) -> Result<Vec<String>> {
        let path = path::normalize(path);
        let nodes = self.read()?;

        match nodes.get(path) {
            Some(Node::Directory) => {}
            Some(Node::File(_)) => {
                return Err(Error::InvalidInput(format!("not a directory: {path}")));
            }
            None => return Err(Error::NotFound(format!("directory not found: {path}"))),
        }

        let prefix = child_prefix(path);
        Ok(nodes
            .range(prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&prefix))
            .filter(|(k, _)| !k[prefix.len()..].contains(path::SEPARATOR))
            .map(|(k, _)| k.clone())
            .collect())
    }

    async fn is_directory(&self, path: &str) -> Result<bool> {
        Ok(matches!(
            self.read()?.get(path::normalize(path)),
            Some(Node::Directory)
        ))
    }

    async fn remove(&self, path: &str, recursive: bool) -> Result<()> {
        let path = path::normalize(path);
        let mut nodes = self.write()?;

        match nodes.get(path) {
            None => return Err(Error::NotFound(format!("path not found: {path}"))),
            Some(Node::File(_)) => {
                nodes.remove(path);
                return Ok(());
            }
            Some(Node::Directory) => {}
        }

        let prefix = child_prefix(path);
        let has_children = nodes
            .range(prefix.clone()..)
            .next()
            .is_some_and(|(k, _)| k.starts_with(&prefix));
        if has_children && !recursive {
            return Err(Error::precondition(format!(
                "directory not empty: {path}"
            )));
        }

        nodes.retain(|k, _| k != path && !k.starts_with(&prefix));
        drop(nodes);
        Ok(())
    }

    async fn create_dir(&self, path: &str) -> Result<()> {
        self.put_dir(path)
    }
}
