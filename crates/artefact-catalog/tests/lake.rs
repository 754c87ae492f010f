//! Lake integration tests over the memory and local filesystem backends.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use artefact_catalog::{Artefact, ArtefactKind, ArtefactSummary, Lake, ReservationPolicy};
use artefact_core::{LocalFileSystemBackend, StorageBackend};
use artefact_test_utils::{TestContext, assert_storage_ops_contain, init_test_logging};

#[tokio::test]
async fn test_open_populates_every_namespace() {
    init_test_logging();
    let ctx = TestContext::new().with_lake_layout();
    ctx.add_dataset("events");
    ctx.add_dataset("users");
    ctx.add_model("churn");
    ctx.add_other_file("metrics.json");

    let lake = Lake::open(ctx.root.clone(), ctx.backend()).await.unwrap();

    assert_eq!(lake.datasets().list().await, vec!["events", "users"]);
    assert_eq!(lake.models().list().await, vec!["churn"]);
    assert_eq!(lake.others().list().await, vec!["metrics.json"]);
    assert_eq!(
        lake.models().get("churn").await.unwrap().kind(),
        ArtefactKind::Model
    );
    assert_storage_ops_contain(
        &ctx.storage.operations(),
        &[("list", "lake/datasets"), ("list", "lake/models"), ("list", "lake/others")],
    );
}

#[tokio::test]
async fn test_initialize_is_idempotent() {
    let ctx = TestContext::new();
    Lake::initialize(ctx.root.clone(), ctx.backend()).await.unwrap();
    ctx.add_dataset("events");

    let lake = Lake::initialize(ctx.root.clone(), ctx.backend()).await.unwrap();

    assert_eq!(lake.datasets().list().await, vec!["events"]);
    assert_eq!(ctx.storage.operations_named("create_dir").len(), 6);
}

#[tokio::test]
async fn test_lake_refresh_reports_per_namespace() {
    let ctx = TestContext::new().with_lake_layout();
    let lake = Lake::open(ctx.root.clone(), ctx.backend()).await.unwrap();
    let reserved = lake.models().register_by_name("ranker").await.unwrap();

    ctx.add_dataset("events");
    ctx.storage.put_file(&format!("{}/weights.bin", reserved.path()), "w");

    let report = lake.refresh(ReservationPolicy::Keep).await.unwrap();

    assert_eq!(report.datasets.added, vec!["events"]);
    assert_eq!(report.models.promoted, vec!["ranker"]);
    assert!(report.others.is_unchanged());
}

#[tokio::test]
async fn test_summary_reflects_backend_state() {
    let ctx = TestContext::new().with_lake_layout();
    let lake = Lake::open(ctx.root.clone(), ctx.backend()).await.unwrap();
    let reserved = lake.datasets().register_by_name("pending").await.unwrap();

    let summary = ArtefactSummary::describe("pending", &reserved).await.unwrap();

    assert!(!summary.exists);
    assert_eq!(summary.path, "lake/datasets/pending");
    assert_eq!(summary.kind, ArtefactKind::Dataset);
}

#[tokio::test]
async fn test_local_filesystem_lake_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path().to_string_lossy().into_owned();
    let backend: Arc<dyn StorageBackend> = Arc::new(LocalFileSystemBackend::new());

    let lake = Lake::initialize(root.clone(), Arc::clone(&backend)).await.unwrap();
    let dataset = lake.datasets().register_by_name("events").await.unwrap();
    std::fs::create_dir_all(dataset.path()).unwrap();
    std::fs::write(format!("{}/part-0.parquet", dataset.path()), b"rows").unwrap();
    std::fs::write(dir.path().join("others/stats.json"), b"{}").unwrap();

    let report = lake.refresh(ReservationPolicy::Keep).await.unwrap();
    assert_eq!(report.datasets.promoted, vec!["events"]);
    assert_eq!(report.others.added, vec!["stats.json"]);

    let reopened = Lake::open(root, Arc::clone(&backend)).await.unwrap();
    let found = reopened.datasets().get("events").await.unwrap();
    assert_eq!(found.path(), dataset.path());

    reopened.datasets().delete("events").await.unwrap();
    assert!(!dir.path().join("datasets/events").exists());
    assert!(reopened.datasets().is_empty().await);

    let model = Artefact::new(
        format!("{}/models/missing", dir.path().display()),
        ArtefactKind::Model,
        backend,
    );
    assert!(reopened.models().register("missing", model).await.is_err());
}
