//! List command - list registered artefacts.

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;

use artefact_catalog::{ArtefactKind, ArtefactSummary, Lake};

use super::{describe_kind, open_lake, render_summaries};
use crate::{Config, KindArg, OutputFormat};

/// Arguments for the list command.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only list this kind. Lists every kind when omitted.
    #[arg(long, short = 'k', value_enum)]
    pub kind: Option<KindArg>,
}

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if the lake cannot be opened or an existence check fails.
pub async fn execute(args: ListArgs, config: &Config) -> Result<()> {
    let lake = open_lake(&config.lake.root, super::local_backend()).await?;
    let kinds = selected_kinds(args.kind);

    if config.format == OutputFormat::Text && kinds.len() > 1 {
        for kind in kinds {
            let summaries = describe_kind(&lake, kind).await?;
            println!("{}:", kind.directory().bold());
            for summary in &summaries {
                println!("  {}", summary.name);
            }
        }
        return Ok(());
    }

    let summaries = run(&lake, args.kind).await?;
    println!("{}", render_summaries(&summaries, config.format)?);
    Ok(())
}

/// Describes the artefacts of the selected kinds, grouped by kind then sorted by name.
///
/// # Errors
///
/// Returns an error if an existence check fails.
pub async fn run(lake: &Lake, kind: Option<KindArg>) -> Result<Vec<ArtefactSummary>> {
    let mut summaries = Vec::new();
    for kind in selected_kinds(kind) {
        summaries.extend(describe_kind(lake, kind).await?);
    }
    Ok(summaries)
}

fn selected_kinds(kind: Option<KindArg>) -> Vec<ArtefactKind> {
    match kind {
        Some(kind) => vec![kind.into()],
        None => vec![ArtefactKind::Dataset, ArtefactKind::Model, ArtefactKind::Other],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::local_backend;

    #[tokio::test]
    async fn test_list_filters_by_kind() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_string_lossy().into_owned();
        for sub in ["datasets/events", "datasets/users", "models/churn", "others"] {
            std::fs::create_dir_all(dir.path().join(sub)).unwrap();
        }
        std::fs::write(dir.path().join("others/stats.json"), b"{}").unwrap();

        let lake = open_lake(&root, local_backend()).await.unwrap();

        let all = run(&lake, None).await.unwrap();
        let names: Vec<_> = all.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["events", "users", "churn", "stats.json"]);

        let models = run(&lake, Some(KindArg::Model)).await.unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].kind, ArtefactKind::Model);
        assert!(models[0].exists);
    }

    #[tokio::test]
    async fn test_list_requires_layout() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_string_lossy().into_owned();
        let err = open_lake(&root, local_backend()).await.unwrap_err();
        assert!(err.to_string().contains("artefact init"));
    }
}
