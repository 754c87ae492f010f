//! Multi-namespace lake over one root.
//!
//! A lake groups the three registries that share a root path:
//!
//! ```text
//! {root}/
//! ├── datasets/    # DatasetRegistry
//! ├── models/      # ModelRegistry
//! └── others/      # OtherRegistry (metrics, statistics, reports)
//! ```

use std::sync::Arc;

use tracing::info;

use artefact_core::StorageBackend;
use artefact_core::path;

use crate::error::Result;
use crate::namespace::{Datasets, Models, Namespace, Others};
use crate::registry::{
    DatasetRegistry, ModelRegistry, OtherRegistry, RefreshReport, Registry, ReservationPolicy,
};

/// Refresh results for every namespace of a lake.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LakeRefreshReport {
    /// Dataset changes.
    pub datasets: RefreshReport,
    /// Model changes.
    pub models: RefreshReport,
    /// Other-artefact changes.
    pub others: RefreshReport,
}

/// The dataset, model and other registries under one root.
#[derive(Debug)]
pub struct Lake {
    root_path: String,
    datasets: DatasetRegistry,
    models: ModelRegistry,
    others: OtherRegistry,
}

impl Lake {
    /// Creates the lake layout if missing, then opens every namespace.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Backend`](crate::CatalogError::Backend) if a
    /// namespace directory cannot be created or scanned.
    pub async fn initialize(
        root_path: impl Into<String>,
        backend: Arc<dyn StorageBackend>,
    ) -> Result<Self> {
        let root_path = root_path.into();
        for dir in [
            namespace_root::<Datasets>(&root_path),
            namespace_root::<Models>(&root_path),
            namespace_root::<Others>(&root_path),
        ] {
            backend.create_dir(&dir).await?;
        }
        info!(root = %root_path, "lake layout ensured");
        Self::open(root_path, backend).await
    }

    /// Opens every namespace of an existing lake.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Backend`](crate::CatalogError::Backend) if a
    /// namespace directory is missing or cannot be scanned.
    pub async fn open(
        root_path: impl Into<String>,
        backend: Arc<dyn StorageBackend>,
    ) -> Result<Self> {
        let root_path = root_path.into();
        let datasets = open_namespace(&root_path, &backend).await?;
        let models = open_namespace(&root_path, &backend).await?;
        let others = open_namespace(&root_path, &backend).await?;

        Ok(Self {
            root_path,
            datasets,
            models,
            others,
        })
    }

    /// Returns the lake root path.
    #[must_use]
    pub fn root_path(&self) -> &str {
        &self.root_path
    }

    /// Returns the dataset registry.
    #[must_use]
    pub fn datasets(&self) -> &DatasetRegistry {
        &self.datasets
    }

    /// Returns the model registry.
    #[must_use]
    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    /// Returns the registry of other artefacts.
    #[must_use]
    pub fn others(&self) -> &OtherRegistry {
        &self.others
    }

    /// Refreshes every namespace with the same reservation policy.
    ///
    /// # Errors
    ///
    /// Returns the first backend failure. Namespaces refreshed before the
    /// failure keep their new state.
    pub async fn refresh(&self, policy: ReservationPolicy) -> Result<LakeRefreshReport> {
        Ok(LakeRefreshReport {
            datasets: self.datasets.refresh(policy).await?,
            models: self.models.refresh(policy).await?,
            others: self.others.refresh(policy).await?,
        })
    }
}

fn namespace_root<N: Namespace>(root: &str) -> String {
    path::join(root, N::KIND.directory())
}

async fn open_namespace<N: Namespace>(
    root: &str,
    backend: &Arc<dyn StorageBackend>,
) -> Result<Registry<N>> {
    Registry::open(namespace_root::<N>(root), Arc::clone(backend)).await
}
