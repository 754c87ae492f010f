//! Basic usage example demonstrating the artefact lake.
//!
//! Run with: `cargo run --example basic_usage`

use std::sync::Arc;

use artefact_catalog::prelude::*;
use artefact_core::{LogFormat, MemoryBackend, init_logging};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(LogFormat::Pretty);

    let memory = MemoryBackend::new();
    memory.put_file("lake/datasets/events/part-0.parquet", "rows")?;

    let lake = Lake::initialize("lake", Arc::new(memory.clone())).await?;
    println!("Datasets: {:?}", lake.datasets().list().await);

    // Reserve a model, write its weights, then reconcile
    let model = lake.models().register_by_name("churn").await?;
    memory.put_file(&format!("{}/weights.bin", model.path()), "w")?;
    let report = lake.refresh(ReservationPolicy::Keep).await?;
    println!("Promoted models: {:?}", report.models.promoted);

    lake.datasets().delete("events").await?;
    println!("Remaining paths: {:?}", memory.paths());

    Ok(())
}
