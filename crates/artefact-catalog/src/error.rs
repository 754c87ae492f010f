//! Error types for artefact-catalog operations.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur during catalog operations.
///
/// None of these are retried inside the catalog; every one is terminal for
/// the operation that raised it.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The artefact's path does not exist in the backend.
    #[error("artefact doesn't exist at given path: {path}")]
    NotFound {
        /// The path that was checked.
        path: String,
    },

    /// The requested name has no registry entry.
    #[error("artefact {name} doesn't exist in registered artefacts: {registered:?}")]
    NotRegistered {
        /// The name that was looked up.
        name: String,
        /// Names registered at the time of the lookup.
        registered: Vec<String>,
    },

    /// A registration targeted a name that already has an entry.
    #[error("artefact {name} already exists in registered artefacts")]
    AlreadyRegistered {
        /// The name that is already taken.
        name: String,
    },

    /// The artefact belongs to a different namespace than the registry.
    #[error("artefact kind {actual} cannot be registered in a {expected} registry")]
    KindMismatch {
        /// Kind held by the registry.
        expected: crate::artefact::ArtefactKind,
        /// Kind of the rejected artefact.
        actual: crate::artefact::ArtefactKind,
    },

    /// The name cannot be used as a registry key.
    #[error("invalid artefact name {name:?}: {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why the name was rejected.
        reason: &'static str,
    },

    /// The storage backend failed. Passed through unchanged.
    #[error(transparent)]
    Backend(#[from] artefact_core::Error),
}

impl CatalogError {
    /// Returns the backend error, if this failure originated in the backend.
    #[must_use]
    pub fn as_backend(&self) -> Option<&artefact_core::Error> {
        match self {
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}
