//! Test storage implementations with operation tracing.
//!
//! Provides in-memory storage that records all operations for test assertions.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use artefact_core::error::{Error, Result};
use artefact_core::storage::{MemoryBackend, StorageBackend};
use bytes::Bytes;

/// Record of a storage operation for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageOp {
    /// Existence check.
    Exists {
        /// Path that was checked.
        path: String,
    },
    /// Directory listing.
    List {
        /// Directory that was listed.
        path: String,
    },
    /// Directory check.
    IsDirectory {
        /// Path that was checked.
        path: String,
    },
    /// Removal.
    Remove {
        /// Path that was removed.
        path: String,
        /// Whether the removal was recursive.
        recursive: bool,
    },
    /// Directory creation.
    CreateDir {
        /// Directory that was created.
        path: String,
    },
}

impl StorageOp {
    /// Returns the operation name (`exists`, `list`, `is_directory`, `remove`, `create_dir`).
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Exists { .. } => "exists",
            Self::List { .. } => "list",
            Self::IsDirectory { .. } => "is_directory",
            Self::Remove { .. } => "remove",
            Self::CreateDir { .. } => "create_dir",
        }
    }

    /// Returns the path the operation touched.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Exists { path }
            | Self::List { path }
            | Self::IsDirectory { path }
            | Self::Remove { path, .. }
            | Self::CreateDir { path } => path,
        }
    }
}

/// In-memory storage backend with operation tracing.
///
/// Records all operations for later assertion in tests. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct TracingMemoryBackend {
    inner: MemoryBackend,
    operations: Arc<Mutex<Vec<StorageOp>>>,
    fail_paths: Arc<Mutex<Vec<String>>>,
    fail_removes: Arc<Mutex<Vec<String>>>,
    latency: Option<Duration>,
}

impl TracingMemoryBackend {
    /// Creates a new empty tracing storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage with simulated latency.
    #[must_use]
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    /// Writes a file without recording an operation.
    pub fn put_file(&self, path: &str, data: impl Into<Bytes>) {
        self.inner.put_file(path, data).expect("put_file");
    }

    /// Creates a directory without recording an operation.
    pub fn put_dir(&self, path: &str) {
        self.inner.put_dir(path).expect("put_dir");
    }

    /// Returns the wrapped memory backend.
    #[must_use]
    pub fn memory(&self) -> &MemoryBackend {
        &self.inner
    }

    /// Returns all recorded operations.
    #[must_use]
    pub fn operations(&self) -> Vec<StorageOp> {
        self.operations.lock().expect("lock").clone()
    }

    /// Returns recorded operations with the given name.
    #[must_use]
    pub fn operations_named(&self, name: &str) -> Vec<StorageOp> {
        self.operations()
            .into_iter()
            .filter(|op| op.name() == name)
            .collect()
    }

    /// Clears recorded operations.
    pub fn clear_operations(&self) {
        self.operations.lock().expect("lock").clear();
    }

    /// Injects a failure for every operation on the given path prefix.
    pub fn inject_failure(&self, path: impl Into<String>) {
        self.fail_paths.lock().expect("lock").push(path.into());
    }

    /// Injects a failure for removals on the given path prefix only.
    pub fn inject_remove_failure(&self, path: impl Into<String>) {
        self.fail_removes.lock().expect("lock").push(path.into());
    }

    /// Clears all injected failures.
    pub fn clear_failures(&self) {
        self.fail_paths.lock().expect("lock").clear();
        self.fail_removes.lock().expect("lock").clear();
    }

    /// Returns all stored paths (for debugging).
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.inner.paths()
    }

    fn record(&self, op: StorageOp) {
        self.operations.lock().expect("lock").push(op);
    }

    fn check_failure(list: &Mutex<Vec<String>>, path: &str) -> Result<()> {
        let fail_paths = list.lock().expect("lock");
        if fail_paths.iter().any(|p| path.starts_with(p)) {
            return Err(Error::storage(format!("Injected failure for path: {path}")));
        }
        Ok(())
    }

    async fn maybe_delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait::async_trait]
impl StorageBackend for TracingMemoryBackend {
    async fn exists(&self, path: &str) -> Result<bool> {
        self.maybe_delay().await;
        Self::check_failure(&self.fail_paths, path)?;
        self.record(StorageOp::Exists {
            path: path.to_string(),
        });
        self.inner.exists(path).await
    }

    async fn list(&self, path: &str) -> Result<Vec<String>> {
        self.maybe_delay().await;
        Self::check_failure(&self.fail_paths, path)?;
        self.record(StorageOp::List {
            path: path.to_string(),
        });
        self.inner.list(path).await
    }

    async fn is_directory(&self, path: &str) -> Result<bool> {
        self.maybe_delay().await;
        Self::check_failure(&self.fail_paths, path)?;
        self.record(StorageOp::IsDirectory {
            path: path.to_string(),
        });
        self.inner.is_directory(path).await
    }

    async fn remove(&self, path: &str, recursive: bool) -> Result<()> {
        self.maybe_delay().await;
        Self::check_failure(&self.fail_paths, path)?;
        self.record(StorageOp::Remove {
            path: path.to_string(),
            recursive,
        });
        Self::check_failure(&self.fail_removes, path)?;
        self.inner.remove(path, recursive).await
    }

    async fn create_dir(&self, path: &str) -> Result<()> {
        self.maybe_delay().await;
        Self::check_failure(&self.fail_paths, path)?;
        self.record(StorageOp::CreateDir {
            path: path.to_string(),
        });
        self.inner.create_dir(path).await
    }
}
