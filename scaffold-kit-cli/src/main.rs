//! scaffold-kit CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]
#![allow(missing_docs)]

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{ContextCommand, EntityArgs, FieldsCommand, RenderCommand, RunCommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scaffold")]
#[command(version)]
#[command(about = "Render entity templates into files that are never overwritten", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./scaffold.toml and the user config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one template for an entity
    Render(RenderCommand),
    /// Render every unit listed in a recipe file
    Run {
        /// Recipe file (TOML)
        recipe: PathBuf,
    },
    /// Print the merge context of an entity as JSON
    Context {
        #[command(flatten)]
        entity: EntityArgs,
    },
    /// List the fields templates will see
    Fields {
        #[command(flatten)]
        entity: EntityArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    scaffold_kit::observability::init(cli.verbose);
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "scaffold starting");

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Render(cmd) => {
            cmd.execute(config)?;
        }
        Commands::Run { recipe } => {
            let cmd = RunCommand::new(recipe);
            cmd.execute(config)?;
        }
        Commands::Context { entity } => {
            ContextCommand::new(entity).execute()?;
        }
        Commands::Fields { entity } => {
            FieldsCommand::new(entity).execute()?;
        }
    }

    Ok(())
}
