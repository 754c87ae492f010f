//! Create command - register a new, empty artefact directory.

use anyhow::{Context, Result};
use clap::Args;

use artefact_catalog::{Artefact, ArtefactKind, ArtefactSummary, Lake};

use super::{open_lake, render_summary};
use crate::{Config, KindArg};

/// Arguments for the create command.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Name to reserve.
    #[arg()]
    pub name: String,

    /// Kind of artefact.
    #[arg(long, short = 'k', value_enum, default_value = "dataset")]
    pub kind: KindArg,
}

/// Execute the create command.
///
/// # Errors
///
/// Returns an error if the lake cannot be opened, the name is taken or
/// invalid, or the directory cannot be created.
pub async fn execute(args: CreateArgs, config: &Config) -> Result<()> {
    let lake = open_lake(&config.lake.root, super::local_backend()).await?;
    let summary = run(&lake, &args).await?;
    println!("{}", render_summary(&summary, config.format)?);
    Ok(())
}

/// Reserves `args.name` and creates its directory.
///
/// The registry index lives only as long as this process, so the directory
/// is what makes the artefact visible to the next `open`.
///
/// # Errors
///
/// Returns an error if the name is taken or invalid, or the directory cannot
/// be created.
pub async fn run(lake: &Lake, args: &CreateArgs) -> Result<ArtefactSummary> {
    let artefact = reserve(lake, args.kind.into(), &args.name)
        .await
        .with_context(|| format!("Failed to create {}", args.name))?;

    artefact
        .backend()
        .create_dir(artefact.path())
        .await
        .with_context(|| format!("Failed to create directory {}", artefact.path()))?;

    Ok(ArtefactSummary::describe(args.name.clone(), &artefact).await?)
}

async fn reserve(
    lake: &Lake,
    kind: ArtefactKind,
    name: &str,
) -> artefact_catalog::Result<Artefact> {
    match kind {
        ArtefactKind::Dataset => lake.datasets().register_by_name(name).await,
        ArtefactKind::Model => lake.models().register_by_name(name).await,
        ArtefactKind::Other => lake.others().register_by_name(name).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::local_backend;

    fn args(name: &str, kind: KindArg) -> CreateArgs {
        CreateArgs {
            name: name.to_string(),
            kind,
        }
    }

    #[tokio::test]
    async fn test_create_model_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_string_lossy().into_owned();
        let lake = Lake::initialize(root.as_str(), local_backend()).await.unwrap();

        let summary = run(&lake, &args("ranker", KindArg::Model)).await.unwrap();

        assert!(summary.exists);
        assert_eq!(summary.kind, ArtefactKind::Model);
        assert!(dir.path().join("models/ranker").is_dir());
    }

    #[tokio::test]
    async fn test_created_artefact_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_string_lossy().into_owned();
        let lake = Lake::initialize(root.as_str(), local_backend()).await.unwrap();
        run(&lake, &args("events", KindArg::Dataset)).await.unwrap();
        drop(lake);

        let reopened = open_lake(&root, local_backend()).await.unwrap();

        assert_eq!(reopened.datasets().list().await, vec!["events"]);
        assert!(!reopened.datasets().is_reserved("events").await);
        let found = reopened.datasets().get("events").await.unwrap();
        assert!(found.path().ends_with("datasets/events"));
    }

    #[tokio::test]
    async fn test_create_existing_name_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("datasets/events")).unwrap();
        let root = dir.path().to_string_lossy().into_owned();
        let lake = Lake::initialize(root.as_str(), local_backend()).await.unwrap();

        let err = run(&lake, &args("events", KindArg::Dataset))
            .await
            .unwrap_err();

        assert!(format!("{err:#}").contains("already exists"), "{err:#}");
    }

    #[tokio::test]
    async fn test_create_rejects_nested_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("others")).unwrap();
        std::fs::write(dir.path().join("others/stats.json"), b"{}").unwrap();
        let root = dir.path().to_string_lossy().into_owned();
        let lake = Lake::initialize(root.as_str(), local_backend()).await.unwrap();

        let err = run(&lake, &args("stats.json/inner", KindArg::Other))
            .await
            .unwrap_err();

        assert!(format!("{err:#}").contains("invalid artefact name"), "{err:#}");
    }
}
