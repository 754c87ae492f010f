//! Artefact data model for the catalog.
//!
//! An artefact is an immutable reference to a location in a storage backend:
//! a dataset, a model, or some other derived object. The artefact never reads
//! its own contents; it only knows where it lives and which backend owns it.
//!
//! # Existence
//!
//! [`Artefact::exists`] asks the backend on every call. The backend is the
//! source of truth and may change underfoot, so nothing is cached.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use artefact_core::StorageBackend;
use artefact_core::path;

use crate::error::{CatalogError, Result};

/// Kind of object an artefact refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtefactKind {
    /// A dataset directory (e.g. Hive-partitioned Parquet).
    Dataset,
    /// A trained model.
    Model,
    /// Anything else: metrics, statistics, reports.
    Other,
}

impl ArtefactKind {
    /// Returns the lake sub-directory holding artefacts of this kind.
    #[must_use]
    pub const fn directory(&self) -> &'static str {
        match self {
            Self::Dataset => "datasets",
            Self::Model => "models",
            Self::Other => "others",
        }
    }

    /// Returns the lowercase label used in logs and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dataset => "dataset",
            Self::Model => "model",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ArtefactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to one object in a storage backend.
///
/// The path is fixed at construction. The backend is shared with the
/// registry that holds the artefact; dropping an artefact never touches it.
#[derive(Clone)]
pub struct Artefact {
    path: String,
    kind: ArtefactKind,
    backend: Arc<dyn StorageBackend>,
}

impl Artefact {
    /// Creates an artefact without checking that its path exists.
    ///
    /// Use this to reserve a name whose backing directory will be written later.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        kind: ArtefactKind,
        backend: Arc<dyn StorageBackend>,
    ) -> Self {
        Self {
            path: path.into(),
            kind,
            backend,
        }
    }

    /// Creates an artefact for a path that must already exist.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the backend has nothing at `path`,
    /// or [`CatalogError::Backend`] if the existence check itself fails.
    pub async fn from_path(
        path: impl Into<String>,
        kind: ArtefactKind,
        backend: Arc<dyn StorageBackend>,
    ) -> Result<Self> {
        let artefact = Self::new(path, kind, backend);
        if !artefact.exists().await? {
            return Err(CatalogError::NotFound {
                path: artefact.path,
            });
        }
        Ok(artefact)
    }

    /// Returns whether the artefact's path currently exists in the backend.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged if the check fails.
    pub async fn exists(&self) -> Result<bool> {
        Ok(self.backend.exists(&self.path).await?)
    }

    /// Returns the artefact's path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the final segment of the artefact's path.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        path::file_name(&self.path)
    }

    /// Returns the artefact's kind.
    #[must_use]
    pub fn kind(&self) -> ArtefactKind {
        self.kind
    }

    /// Returns the backend that owns the artefact.
    #[must_use]
    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    /// Returns true if both artefacts are served by the same backend instance.
    #[must_use]
    pub fn same_backend(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.backend), Arc::as_ptr(&other.backend))
    }
}

impl PartialEq for Artefact {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.kind == other.kind && self.same_backend(other)
    }
}

impl Eq for Artefact {}

impl fmt::Debug for Artefact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Artefact")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Serializable view of an artefact, for listings and CLI output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtefactSummary {
    /// Registry name.
    pub name: String,
    /// Backend path.
    pub path: String,
    /// Artefact kind.
    pub kind: ArtefactKind,
    /// Whether the path existed when the summary was taken.
    pub exists: bool,
}

impl ArtefactSummary {
    /// Builds a summary, checking existence against the backend.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged if the existence check fails.
    pub async fn describe(name: impl Into<String>, artefact: &Artefact) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            path: artefact.path.clone(),
            kind: artefact.kind,
            exists: artefact.exists().await?,
        })
    }
}
