//! Subcommand implementations.
//!
//! Each subcommand exposes an `execute` entry point that prints to stdout,
//! built on a `run` function returning the result to render.

pub mod create;
pub mod delete;
pub mod init;
pub mod list;
pub mod show;

use std::sync::Arc;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tabled::{Table, Tabled};

use artefact_catalog::{ArtefactKind, ArtefactSummary, Lake, Namespace, Registry};
use artefact_core::{LocalFileSystemBackend, StorageBackend};

use crate::OutputFormat;

/// Returns the local filesystem backend the CLI operates on.
#[must_use]
pub fn local_backend() -> Arc<dyn StorageBackend> {
    Arc::new(LocalFileSystemBackend::new())
}

/// Opens the lake under `root`.
///
/// # Errors
///
/// Returns an error if the lake layout is missing or cannot be scanned.
pub async fn open_lake(root: &str, backend: Arc<dyn StorageBackend>) -> Result<Lake> {
    Lake::open(root, backend)
        .await
        .with_context(|| format!("Failed to open lake at {root}. Run `artefact init` first"))
}

/// Describes every entry of `registry`, sorted by name.
async fn describe_all<N: Namespace>(registry: &Registry<N>) -> Result<Vec<ArtefactSummary>> {
    let mut summaries = Vec::new();
    for (name, artefact) in registry.entries().await {
        summaries.push(ArtefactSummary::describe(name, &artefact).await?);
    }
    Ok(summaries)
}

/// Describes every entry of the registry holding `kind`.
///
/// # Errors
///
/// Returns an error if an existence check fails.
pub async fn describe_kind(lake: &Lake, kind: ArtefactKind) -> Result<Vec<ArtefactSummary>> {
    match kind {
        ArtefactKind::Dataset => describe_all(lake.datasets()).await,
        ArtefactKind::Model => describe_all(lake.models()).await,
        ArtefactKind::Other => describe_all(lake.others()).await,
    }
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Exists")]
    exists: bool,
}

/// Renders summaries in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_summaries(summaries: &[ArtefactSummary], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summaries)?),
        OutputFormat::Text => {
            if summaries.is_empty() {
                return Ok("No artefacts found".to_string());
            }
            let lines: Vec<String> = summaries
                .iter()
                .map(|s| format!("{} {}", s.name, format!("({})", s.kind).dimmed()))
                .collect();
            Ok(lines.join("\n"))
        }
        OutputFormat::Table => {
            if summaries.is_empty() {
                return Ok("No artefacts found".to_string());
            }
            let rows = summaries.iter().map(|s| SummaryRow {
                name: s.name.clone(),
                kind: s.kind.to_string(),
                path: s.path.clone(),
                exists: s.exists,
            });
            Ok(Table::new(rows).to_string())
        }
    }
}

/// Renders one summary in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_summary(summary: &ArtefactSummary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
        OutputFormat::Table => render_summaries(std::slice::from_ref(summary), format),
        OutputFormat::Text => {
            let exists = if summary.exists {
                "yes".green().to_string()
            } else {
                "no (reserved)".yellow().to_string()
            };
            Ok(format!(
                "Name:   {}\nKind:   {}\nPath:   {}\nExists: {exists}",
                summary.name.bold(),
                summary.kind,
                summary.path
            ))
        }
    }
}
