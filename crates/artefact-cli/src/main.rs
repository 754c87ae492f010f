//! Artefact CLI - manage an artefact lake on the local filesystem.
//!
//! The main entry point for the `artefact` CLI binary.

use anyhow::Result;
use clap::Parser;

use artefact_cli::{Cli, Commands, commands};
use artefact_core::init_logging_with;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    let config = cli.config()?;

    init_logging_with(config.lake.log_format, "warn");
    artefact_catalog::metrics::register_metrics();

    // Create runtime and execute
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        match cli.command {
            Commands::Init => commands::init::execute(&config).await,
            Commands::List(args) => commands::list::execute(args, &config).await,
            Commands::Create(args) => commands::create::execute(args, &config).await,
            Commands::Delete(args) => commands::delete::execute(args, &config).await,
            Commands::Show(args) => commands::show::execute(args, &config).await,
        }
    })
}
