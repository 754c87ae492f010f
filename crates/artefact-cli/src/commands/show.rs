//! Show command - describe one artefact.

use anyhow::{Context, Result};
use clap::Args;

use artefact_catalog::{ArtefactKind, ArtefactSummary, Lake};

use super::{open_lake, render_summary};
use crate::{Config, KindArg};

/// Arguments for the show command.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Name of the artefact.
    #[arg()]
    pub name: String,

    /// Kind of artefact.
    #[arg(long, short = 'k', value_enum, default_value = "dataset")]
    pub kind: KindArg,
}

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if the lake cannot be opened or the name is not registered.
pub async fn execute(args: ShowArgs, config: &Config) -> Result<()> {
    let lake = open_lake(&config.lake.root, super::local_backend()).await?;
    let summary = run(&lake, args.kind.into(), &args.name).await?;
    println!("{}", render_summary(&summary, config.format)?);
    Ok(())
}

/// Looks up `name` in the registry holding `kind` and describes it.
///
/// # Errors
///
/// Returns an error if the name is not registered or the existence check fails.
pub async fn run(lake: &Lake, kind: ArtefactKind, name: &str) -> Result<ArtefactSummary> {
    let artefact = match kind {
        ArtefactKind::Dataset => lake.datasets().get(name).await,
        ArtefactKind::Model => lake.models().get(name).await,
        ArtefactKind::Other => lake.others().get(name).await,
    }
    .with_context(|| format!("Failed to show {kind} {name}"))?;

    Ok(ArtefactSummary::describe(name, &artefact).await?)
}
