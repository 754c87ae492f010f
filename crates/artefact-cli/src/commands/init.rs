//! Init command - create the lake layout.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use artefact_catalog::Lake;
use artefact_core::StorageBackend;

use crate::{Config, OutputFormat};

/// What `init` found after ensuring the layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitReport {
    /// Lake root.
    pub root: String,
    /// Datasets already present.
    pub datasets: usize,
    /// Models already present.
    pub models: usize,
    /// Other artefacts already present.
    pub others: usize,
}

/// Execute the init command.
///
/// # Errors
///
/// Returns an error if a namespace directory cannot be created or scanned.
pub async fn execute(config: &Config) -> Result<()> {
    let report = run(&config.lake.root, super::local_backend()).await?;

    match config.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text | OutputFormat::Table => {
            println!("Initialized lake at {}", report.root);
            println!(
                "  {} datasets, {} models, {} others",
                report.datasets, report.models, report.others
            );
        }
    }
    Ok(())
}

/// Creates the layout under `root` and counts what is already there.
///
/// # Errors
///
/// Returns an error if a namespace directory cannot be created or scanned.
pub async fn run(root: &str, backend: Arc<dyn StorageBackend>) -> Result<InitReport> {
    let lake = Lake::initialize(root, backend)
        .await
        .with_context(|| format!("Failed to initialize lake at {root}"))?;

    Ok(InitReport {
        root: lake.root_path().to_string(),
        datasets: lake.datasets().len().await,
        models: lake.models().len().await,
        others: lake.others().len().await,
    })
}
