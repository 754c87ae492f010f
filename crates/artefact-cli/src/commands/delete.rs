//! Delete command - remove an artefact and its data.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

use artefact_catalog::{ArtefactKind, Lake};

use super::open_lake;
use crate::{Config, KindArg, OutputFormat};

/// Arguments for the delete command.
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Name of the artefact to delete.
    #[arg()]
    pub name: String,

    /// Kind of artefact.
    #[arg(long, short = 'k', value_enum, default_value = "dataset")]
    pub kind: KindArg,
}

/// Execute the delete command.
///
/// # Errors
///
/// Returns an error if the lake cannot be opened, the name is not
/// registered, or the backend removal fails.
pub async fn execute(args: DeleteArgs, config: &Config) -> Result<()> {
    let lake = open_lake(&config.lake.root, super::local_backend()).await?;
    let kind = ArtefactKind::from(args.kind);
    run(&lake, kind, &args.name).await?;

    match config.format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "deleted": args.name, "kind": kind }))?
        ),
        OutputFormat::Text | OutputFormat::Table => println!("Deleted {kind} {}", args.name),
    }
    Ok(())
}

/// Deletes `name` from the registry holding `kind`.
///
/// # Errors
///
/// Returns an error if the name is not registered or the removal fails.
pub async fn run(lake: &Lake, kind: ArtefactKind, name: &str) -> Result<()> {
    let result = match kind {
        ArtefactKind::Dataset => lake.datasets().delete(name).await,
        ArtefactKind::Model => lake.models().delete(name).await,
        ArtefactKind::Other => lake.others().delete(name).await,
    };
    result.with_context(|| format!("Failed to delete {kind} {name}"))
}
