//! The registry engine.
//!
//! A [`Registry`] maps human-readable names to [`Artefact`]s living under one
//! root path. Callers register, look up, list and delete by name and never
//! build physical paths themselves.
//!
//! # Invariants
//!
//! - Names are unique. Registration never overwrites an existing entry.
//! - A checked registration only succeeds if the artefact exists in the backend.
//! - `delete` drops the entry only after the backend confirms removal; a
//!   failed removal leaves the registry exactly as it was.
//!
//! # Reservations
//!
//! [`Registry::register_by_name`] reserves a name under the root before any
//! data is written. The reservation is tracked so that [`Registry::refresh`]
//! can reconcile it against the backend under an explicit
//! [`ReservationPolicy`].
//!
//! # Concurrency
//!
//! All state sits behind a single async mutex held for the whole of each
//! operation, backend calls included. Two callers racing to register one name
//! resolve to exactly one winner; the other observes
//! [`CatalogError::AlreadyRegistered`].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{Instrument, debug, info, warn};

use artefact_core::StorageBackend;
use artefact_core::observability::registry_span;
use artefact_core::path;

use crate::artefact::{Artefact, ArtefactKind};
use crate::error::{CatalogError, Result};
use crate::metrics;
use crate::namespace::{Datasets, Models, Namespace, Others};

/// Registry of datasets, populated from directories under its root.
pub type DatasetRegistry = Registry<Datasets>;

/// Registry of models.
pub type ModelRegistry = Registry<Models>;

/// Registry of other derived objects.
pub type OtherRegistry = Registry<Others>;

/// What [`Registry::refresh`] does with reservations the backend doesn't back yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReservationPolicy {
    /// Keep unbacked reservations registered.
    #[default]
    Keep,
    /// Drop unbacked reservations.
    Drop,
}

/// Names that changed during a refresh. Each list is sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Names that were not registered before the refresh.
    pub added: Vec<String>,
    /// Names that were registered before and are gone now.
    pub removed: Vec<String>,
    /// Reservations the scan found backed, now ordinary entries.
    pub promoted: Vec<String>,
    /// Registrations whose path differed from the scanned child of the same
    /// name. The scanned artefact took their place.
    pub replaced: Vec<String>,
}

impl RefreshReport {
    /// Returns true if the refresh changed nothing.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.promoted.is_empty()
            && self.replaced.is_empty()
    }
}

struct RegistryState {
    entries: BTreeMap<String, Artefact>,
    reserved: BTreeSet<String>,
}

impl RegistryState {
    fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn get(&self, name: &str) -> Result<&Artefact> {
        self.entries
            .get(name)
            .ok_or_else(|| CatalogError::NotRegistered {
                name: name.to_string(),
                registered: self.names(),
            })
    }
}

/// In-memory catalog of named artefacts under one root path.
///
/// `N` fixes the artefact kind and the bootstrap scan rule; see
/// [`Namespace`]. The index itself is never persisted: [`Registry::open`]
/// rebuilds it from the backend.
pub struct Registry<N: Namespace> {
    root_path: String,
    backend: Arc<dyn StorageBackend>,
    state: Mutex<RegistryState>,
    namespace: PhantomData<fn() -> N>,
}

impl<N: Namespace> Registry<N> {
    /// Creates an empty registry. Entries are added only by registration.
    #[must_use]
    pub fn empty(root_path: impl Into<String>, backend: Arc<dyn StorageBackend>) -> Self {
        Self::with_entries(root_path.into(), backend, BTreeMap::new())
    }

    /// Creates a registry populated by scanning the backend under `root_path`.
    ///
    /// Every direct child the namespace admits becomes an entry named by its
    /// final path segment. The scan runs once, before the registry is returned.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Backend`] if listing the root or inspecting a
    /// child fails (including a missing root).
    pub async fn open(
        root_path: impl Into<String>,
        backend: Arc<dyn StorageBackend>,
    ) -> Result<Self> {
        let root_path = root_path.into();
        let span = registry_span("open", N::KIND.as_str(), &root_path);

        async move {
            let entries = scan::<N>(&root_path, &backend).await?;
            info!(entries = entries.len(), "registry opened");
            Ok(Self::with_entries(root_path, backend, entries))
        }
        .instrument(span)
        .await
    }

    fn with_entries(
        root_path: String,
        backend: Arc<dyn StorageBackend>,
        entries: BTreeMap<String, Artefact>,
    ) -> Self {
        Self {
            root_path,
            backend,
            state: Mutex::new(RegistryState {
                entries,
                reserved: BTreeSet::new(),
            }),
            namespace: PhantomData,
        }
    }

    /// Returns the root path names are resolved against.
    #[must_use]
    pub fn root_path(&self) -> &str {
        &self.root_path
    }

    /// Returns the backend shared with this registry's artefacts.
    #[must_use]
    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    /// Returns the kind of artefact this registry holds.
    #[must_use]
    pub const fn kind(&self) -> ArtefactKind {
        N::KIND
    }

    /// Returns whether `name` has an entry.
    pub async fn is_registered(&self, name: &str) -> bool {
        self.state.lock().await.entries.contains_key(name)
    }

    /// Returns whether `name` is a reservation not yet reconciled by a refresh.
    pub async fn is_reserved(&self, name: &str) -> bool {
        self.state.lock().await.reserved.contains(name)
    }

    /// Returns the number of entries.
    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    /// Returns true if nothing is registered.
    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.entries.is_empty()
    }

    /// Returns a snapshot of the registered names, sorted.
    pub async fn list(&self) -> Vec<String> {
        self.state.lock().await.names()
    }

    /// Returns a snapshot of the registered artefacts, sorted by name.
    pub async fn list_artefacts(&self) -> Vec<Artefact> {
        self.state.lock().await.entries.values().cloned().collect()
    }

    /// Returns a snapshot of `(name, artefact)` pairs, sorted by name.
    pub async fn entries(&self) -> Vec<(String, Artefact)> {
        self.state
            .lock()
            .await
            .entries
            .iter()
            .map(|(name, artefact)| (name.clone(), artefact.clone()))
            .collect()
    }

    /// Looks up an artefact by name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotRegistered`] if `name` has no entry.
    pub async fn get(&self, name: &str) -> Result<Artefact> {
        self.state.lock().await.get(name).cloned()
    }

    /// Registers an existing artefact under `name`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidName`] if `name` cannot be a registry key.
    /// - [`CatalogError::AlreadyRegistered`] if `name` is taken; the existing
    ///   entry is left untouched.
    /// - [`CatalogError::KindMismatch`] if the artefact belongs to another namespace.
    /// - [`CatalogError::NotFound`] if the artefact's path doesn't exist.
    /// - [`CatalogError::Backend`] if the existence check fails.
    pub async fn register(&self, name: impl Into<String>, artefact: Artefact) -> Result<()> {
        let name = name.into();
        validate_name(&name)?;

        let mut state = self.state.lock().await;
        if state.entries.contains_key(&name) {
            return Err(CatalogError::AlreadyRegistered { name });
        }
        if artefact.kind() != N::KIND {
            return Err(CatalogError::KindMismatch {
                expected: N::KIND,
                actual: artefact.kind(),
            });
        }
        let exists = artefact
            .exists()
            .await
            .inspect_err(|_| metrics::record_backend_error(N::KIND, "exists"))?;
        if !exists {
            return Err(CatalogError::NotFound {
                path: artefact.path().to_string(),
            });
        }

        info!(kind = %N::KIND, name = %name, path = artefact.path(), "registered artefact");
        state.entries.insert(name, artefact);
        drop(state);
        metrics::record_registration(N::KIND, "checked");
        Ok(())
    }

    /// Reserves `name` under the root path without touching the backend.
    ///
    /// The artefact's path is `{root_path}/{name}` and need not exist yet; this
    /// is the create-then-populate path for new artefacts. The reservation is
    /// tracked until a [`refresh`](Self::refresh) finds it backed.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidName`] if `name` cannot be a registry key.
    /// - [`CatalogError::AlreadyRegistered`] if `name` is taken.
    pub async fn register_by_name(&self, name: impl Into<String>) -> Result<Artefact> {
        let name = name.into();
        validate_name(&name)?;

        let mut state = self.state.lock().await;
        if state.entries.contains_key(&name) {
            return Err(CatalogError::AlreadyRegistered { name });
        }

        let artefact = Artefact::new(
            path::join(&self.root_path, &name),
            N::KIND,
            Arc::clone(&self.backend),
        );
        info!(kind = %N::KIND, name = %name, path = artefact.path(), "reserved artefact");
        state.entries.insert(name.clone(), artefact.clone());
        state.reserved.insert(name);
        drop(state);
        metrics::record_registration(N::KIND, "reserved");
        Ok(artefact)
    }

    /// Deletes an artefact from the backend and then from the registry.
    ///
    /// The backend removal is recursive. An unbacked reservation is released
    /// without calling the backend.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotRegistered`] if `name` has no entry.
    /// - [`CatalogError::Backend`] if removal fails; the entry stays registered.
    pub async fn delete(&self, name: &str) -> Result<()> {
        let span = registry_span("delete", N::KIND.as_str(), &self.root_path);

        async {
            let mut state = self.state.lock().await;
            let artefact = state.get(name)?.clone();

            if state.reserved.contains(name)
                && !artefact
                    .exists()
                    .await
                    .inspect_err(|_| metrics::record_backend_error(N::KIND, "exists"))?
            {
                state.entries.remove(name);
                state.reserved.remove(name);
                info!(name, "released unbacked reservation");
                return Ok(());
            }

            if let Err(err) = artefact.backend().remove(artefact.path(), true).await {
                metrics::record_backend_error(N::KIND, "remove");
                warn!(name, path = artefact.path(), error = %err, "backend removal failed, entry kept");
                return Err(err.into());
            }

            state.entries.remove(name);
            state.reserved.remove(name);
            drop(state);
            info!(name, path = artefact.path(), "deleted artefact");
            metrics::record_deletion(N::KIND);
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Re-runs the bootstrap scan and reconciles the registry with it.
    ///
    /// The new entry set is:
    /// - every entry the scan produces (scanned paths win over older entries);
    /// - every pending reservation the scan didn't find, under
    ///   [`ReservationPolicy::Keep`];
    /// - every other entry whose artefact still exists in the backend.
    ///
    /// Reservations found by the scan become ordinary entries. A registration
    /// replaced by a scanned child at another path is listed in
    /// [`RefreshReport::replaced`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Backend`] if the scan or an existence check
    /// fails. The registry is unchanged in that case.
    pub async fn refresh(&self, policy: ReservationPolicy) -> Result<RefreshReport> {
        let span = registry_span("refresh", N::KIND.as_str(), &self.root_path);

        async {
            let mut state = self.state.lock().await;
            let mut next = scan::<N>(&self.root_path, &self.backend).await?;
            let mut reserved = BTreeSet::new();
            let mut report = RefreshReport::default();

            for (name, artefact) in &state.entries {
                let is_reservation = state.reserved.contains(name);
                if let Some(scanned) = next.get(name) {
                    if is_reservation {
                        report.promoted.push(name.clone());
                    } else if scanned.path() != artefact.path() {
                        warn!(
                            name = %name,
                            registered = artefact.path(),
                            scanned = scanned.path(),
                            "scanned artefact replaces registration"
                        );
                        report.replaced.push(name.clone());
                    }
                    continue;
                }

                let keep = if is_reservation {
                    policy == ReservationPolicy::Keep
                } else {
                    artefact
                        .exists()
                        .await
                        .inspect_err(|_| metrics::record_backend_error(N::KIND, "exists"))?
                };

                if keep {
                    next.insert(name.clone(), artefact.clone());
                    if is_reservation {
                        reserved.insert(name.clone());
                    }
                } else {
                    report.removed.push(name.clone());
                }
            }

            report.added = next
                .keys()
                .filter(|name| !state.entries.contains_key(*name))
                .cloned()
                .collect();

            debug!(
                added = ?report.added,
                removed = ?report.removed,
                promoted = ?report.promoted,
                replaced = ?report.replaced,
                "registry refreshed"
            );
            state.entries = next;
            state.reserved = reserved;
            Ok(report)
        }
        .instrument(span)
        .await
    }
}

impl<N: Namespace> fmt::Debug for Registry<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("kind", &N::KIND)
            .field("root_path", &self.root_path)
            .finish_non_exhaustive()
    }
}

/// Lists the backend under `root` and builds the entries `N` admits.
async fn scan<N: Namespace>(
    root: &str,
    backend: &Arc<dyn StorageBackend>,
) -> Result<BTreeMap<String, Artefact>> {
    let children = backend
        .list(root)
        .await
        .inspect_err(|_| metrics::record_backend_error(N::KIND, "list"))?;

    let mut entries = BTreeMap::new();
    for child in children {
        let is_directory = backend
            .is_directory(&child)
            .await
            .inspect_err(|_| metrics::record_backend_error(N::KIND, "is_directory"))?;
        if !N::admits(is_directory) {
            continue;
        }
        let Some(name) = N::entry_name(&child) else {
            continue;
        };
        entries.insert(name, Artefact::new(child, N::KIND, Arc::clone(backend)));
    }

    metrics::record_scan(N::KIND, entries.len());
    Ok(entries)
}

fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "name cannot be empty"
    } else if name.contains(path::SEPARATOR) {
        "name cannot contain path separators"
    } else if name == "." || name == ".." {
        "name cannot be a relative path component"
    } else {
        return Ok(());
    };

    Err(CatalogError::InvalidName {
        name: name.to_string(),
        reason,
    })
}
