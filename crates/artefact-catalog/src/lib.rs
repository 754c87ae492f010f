//! # artefact-catalog
//!
//! Catalog of named artefacts (datasets, models, other derived objects) that
//! physically live under a root path in a storage backend.
//!
//! This crate implements:
//!
//! - **Artefacts**: Immutable references to a backend path, tagged by kind
//! - **Registry**: One generic engine mapping names to artefacts, with
//!   uniqueness and existence checks around register, lookup and delete
//! - **Bootstrap Scan**: Registries rebuilt from the backend on open
//! - **Lake**: The dataset, model and other registries under one root
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── datasets/{name}/     # one directory per dataset
//! ├── models/{name}/       # one directory per model
//! └── others/{name}        # files or directories
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use artefact_catalog::{DatasetRegistry, ReservationPolicy};
//! use artefact_core::LocalFileSystemBackend;
//!
//! let registry = DatasetRegistry::open("/data/lake/datasets", Arc::new(LocalFileSystemBackend::new())).await?;
//!
//! // Reserve a name, write the data, then reconcile
//! let dataset = registry.register_by_name("daily_events").await?;
//! write_partitions(dataset.path()).await?;
//! registry.refresh(ReservationPolicy::Keep).await?;
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod artefact;
pub mod error;
pub mod lake;
pub mod metrics;
pub mod namespace;
pub mod registry;

// Re-export main types at crate root
pub use artefact::{Artefact, ArtefactKind, ArtefactSummary};
pub use error::{CatalogError, Result};
pub use lake::{Lake, LakeRefreshReport};
pub use namespace::{Datasets, Models, Namespace, Others};
pub use registry::{
    DatasetRegistry, ModelRegistry, OtherRegistry, RefreshReport, Registry, ReservationPolicy,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::artefact::{Artefact, ArtefactKind};
    pub use crate::error::{CatalogError, Result};
    pub use crate::lake::Lake;
    pub use crate::registry::{DatasetRegistry, ModelRegistry, OtherRegistry, ReservationPolicy};
}
