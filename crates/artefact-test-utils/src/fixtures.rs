//! Pre-built test fixtures for common test scenarios.
//!
//! Provides factory functions to seed a backend with lake-shaped data.

use std::sync::Arc;

use artefact_core::StorageBackend;
use artefact_core::path;

use crate::storage::TracingMemoryBackend;

/// Test context with a tracing backend and a lake root.
pub struct TestContext {
    /// Shared storage backend.
    pub storage: TracingMemoryBackend,
    /// Lake root path.
    pub root: String,
}

impl TestContext {
    /// Creates a context rooted at `lake`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root("lake")
    }

    /// Creates a context with a specific root.
    #[must_use]
    pub fn with_root(root: impl Into<String>) -> Self {
        Self {
            storage: TracingMemoryBackend::new(),
            root: root.into(),
        }
    }

    /// Returns the backend as the trait object registries expect.
    #[must_use]
    pub fn backend(&self) -> Arc<dyn StorageBackend> {
        Arc::new(self.storage.clone())
    }

    /// Returns `{root}/{namespace}`.
    #[must_use]
    pub fn namespace_root(&self, namespace: &str) -> String {
        path::join(&self.root, namespace)
    }

    /// Creates the `datasets/`, `models/` and `others/` directories.
    pub fn with_lake_layout(self) -> Self {
        for namespace in ["datasets", "models", "others"] {
            self.storage.put_dir(&self.namespace_root(namespace));
        }
        self
    }

    /// Writes a dataset directory with one partition file; returns its path.
    pub fn add_dataset(&self, name: &str) -> String {
        self.add_directory("datasets", name)
    }

    /// Writes a model directory with one weights file; returns its path.
    pub fn add_model(&self, name: &str) -> String {
        self.add_directory("models", name)
    }

    /// Writes a single file under `others/`; returns its path.
    pub fn add_other_file(&self, name: &str) -> String {
        let path = path::join(&self.namespace_root("others"), name);
        self.storage.put_file(&path, "{}");
        path
    }

    fn add_directory(&self, namespace: &str, name: &str) -> String {
        let dir = path::join(&self.namespace_root(namespace), name);
        self.storage.put_file(&path::join(&dir, "part-0.parquet"), "rows");
        dir
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Seeds `root/a`, `root/b` (directories) and `root/c.txt` (file).
///
/// The canonical scan scenario: a dataset scan over `root` yields `a` and `b`.
pub fn seed_mixed_root(storage: &TracingMemoryBackend, root: &str) {
    storage.put_file(&path::join(root, "a/part-0.parquet"), "a");
    storage.put_file(&path::join(root, "b/part-0.parquet"), "b");
    storage.put_file(&path::join(root, "c.txt"), "c");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lake_layout_and_artefacts() {
        let ctx = TestContext::new().with_lake_layout();
        let dataset = ctx.add_dataset("events");
        let other = ctx.add_other_file("metrics.json");

        assert_eq!(dataset, "lake/datasets/events");
        assert_eq!(other, "lake/others/metrics.json");
        let paths = ctx.storage.paths();
        assert!(paths.contains(&"lake/models".to_string()));
        assert!(paths.contains(&"lake/datasets/events/part-0.parquet".to_string()));
    }

    #[test]
    fn mixed_root_seeds_three_children() {
        let storage = TracingMemoryBackend::new();
        seed_mixed_root(&storage, "root");
        assert_eq!(
            storage.paths(),
            vec![
                "root",
                "root/a",
                "root/a/part-0.parquet",
                "root/b",
                "root/b/part-0.parquet",
                "root/c.txt"
            ]
        );
    }
}
