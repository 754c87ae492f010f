//! # artefact-cli
//!
//! Command-line interface for an artefact lake on the local filesystem.
//!
//! ## Commands
//!
//! - `artefact init` - Create the `datasets/`, `models/` and `others/` layout
//! - `artefact list` - List registered artefacts
//! - `artefact create` - Create a new, empty artefact directory
//! - `artefact delete` - Delete an artefact and its data
//! - `artefact show` - Describe one artefact
//!
//! ## Configuration
//!
//! The CLI uses environment variables or command-line flags for settings:
//!
//! - `ARTEFACT_LAKE_ROOT` - Lake root directory (required)
//! - `ARTEFACT_LOG_FORMAT` - `json` or `pretty` (default: `pretty`)
//! - `RUST_LOG` - Log filter (default: `warn`)

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]
// CLI uses print! macros intentionally
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

pub mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use artefact_catalog::ArtefactKind;
use artefact_core::LakeConfig;
use artefact_core::config::{ENV_LAKE_ROOT, ENV_LOG_FORMAT};

/// Artefact CLI - manage datasets, models and other artefacts in a lake.
#[derive(Debug, Parser)]
#[command(name = "artefact")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Lake root directory.
    #[arg(long, env = "ARTEFACT_LAKE_ROOT")]
    pub root: Option<String>,

    /// Log output format (`json` or `pretty`).
    #[arg(long, env = "ARTEFACT_LOG_FORMAT")]
    pub log_format: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the effective configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the lake root is missing or blank, or the log
    /// format is unknown.
    pub fn config(&self) -> Result<Config> {
        // clap has already merged flags with the environment.
        let lake = LakeConfig::from_env_with(|key| match key {
            ENV_LAKE_ROOT => self.root.clone(),
            ENV_LOG_FORMAT => self.log_format.clone(),
            _ => None,
        })
        .context("Invalid settings. Set ARTEFACT_LAKE_ROOT or use --root")?;

        Ok(Config {
            lake,
            format: self.format,
        })
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the lake layout under the root.
    Init,
    /// List registered artefacts.
    List(commands::list::ListArgs),
    /// Create a new, empty artefact.
    Create(commands::create::CreateArgs),
    /// Delete an artefact and its data.
    Delete(commands::delete::DeleteArgs),
    /// Describe one artefact.
    Show(commands::show::ShowArgs),
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// Table output.
    Table,
}

/// Artefact kind selector shared by subcommands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Datasets under `datasets/`.
    #[default]
    Dataset,
    /// Models under `models/`.
    Model,
    /// Other artefacts under `others/`.
    Other,
}

impl From<KindArg> for ArtefactKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Dataset => Self::Dataset,
            KindArg::Model => Self::Model,
            KindArg::Other => Self::Other,
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Lake location and logging settings.
    pub lake: LakeConfig,
    /// Output format.
    pub format: OutputFormat,
}
