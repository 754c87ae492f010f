//! Integration tests for concurrent registry access.
//!
//! These tests verify that check-then-act sequences inside the registry are
//! atomic under contention: racing registrations resolve to one winner and a
//! lookup never observes a half-applied delete.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use artefact_catalog::{Artefact, ArtefactKind, CatalogError, DatasetRegistry};
use artefact_core::StorageBackend;
use artefact_test_utils::{TracingMemoryBackend, assert_removed_once, seed_mixed_root};

fn slow_backend() -> (TracingMemoryBackend, Arc<dyn StorageBackend>) {
    let storage = TracingMemoryBackend::with_latency(Duration::from_millis(5));
    seed_mixed_root(&storage, "root");
    storage.put_file("root/x/part-0.parquet", "x");
    let backend: Arc<dyn StorageBackend> = Arc::new(storage.clone());
    (storage, backend)
}

/// Many tasks race to register one name - exactly one must succeed.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_registrations_have_one_winner() {
    let (_, backend) = slow_backend();
    let registry = Arc::new(DatasetRegistry::empty("root", backend.clone()));
    let winners = Arc::new(AtomicU32::new(0));
    let losers = Arc::new(AtomicU32::new(0));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let backend = Arc::clone(&backend);
            let winners = Arc::clone(&winners);
            let losers = Arc::clone(&losers);

            tokio::spawn(async move {
                let artefact = Artefact::new("root/x", ArtefactKind::Dataset, backend);
                match registry.register("x", artefact).await {
                    Ok(()) => {
                        winners.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(CatalogError::AlreadyRegistered { .. }) => {
                        losers.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(other) => panic!("unexpected error: {other:?}"),
                }
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(winners.load(Ordering::SeqCst), 1, "exactly one registration wins");
    assert_eq!(losers.load(Ordering::SeqCst), 7, "every other caller sees AlreadyRegistered");
    assert_eq!(registry.list().await, vec!["x"]);
}

/// Reservations and checked registrations race on the same name.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_reservation_and_registration_race() {
    let (_, backend) = slow_backend();
    let registry = Arc::new(DatasetRegistry::empty("root", backend.clone()));

    let reserve = {
        let registry = Arc::clone(&registry);
        tokio::spawn(async move { registry.register_by_name("x").await.map(|_| ()) })
    };
    let register = {
        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            let artefact = Artefact::new("root/x", ArtefactKind::Dataset, backend);
            registry.register("x", artefact).await
        })
    };

    let results = [reserve.await.unwrap(), register.await.unwrap()];
    let ok = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(ok, 1, "one of the two callers wins: {results:?}");
    assert!(results.iter().any(|r| matches!(r, Err(CatalogError::AlreadyRegistered { .. }))));
    assert_eq!(registry.get("x").await.unwrap().path(), "root/x");
}

/// Concurrent deletes of the same name remove the data once.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_deletes_remove_once() {
    let (storage, backend) = slow_backend();
    let registry = Arc::new(DatasetRegistry::open("root", backend).await.unwrap());
    storage.clear_operations();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move { registry.delete("a").await })
        })
        .collect();

    let mut deleted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => deleted += 1,
            Err(err) => assert!(matches!(err, CatalogError::NotRegistered { .. }), "{err:?}"),
        }
    }

    assert_eq!(deleted, 1);
    assert_removed_once(&storage.operations(), "root/a");
    assert_eq!(registry.list().await, vec!["b", "x"]);
}

/// Distinct names registered concurrently all land.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_distinct_reservations_all_succeed() {
    let (_, backend) = slow_backend();
    let registry = Arc::new(DatasetRegistry::empty("root", backend));

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move { registry.register_by_name(format!("run_{i:02}")).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let names = registry.list().await;
    assert_eq!(names.len(), 10);
    assert_eq!(names.first().map(String::as_str), Some("run_00"));
    assert_eq!(names.last().map(String::as_str), Some("run_09"));
}
