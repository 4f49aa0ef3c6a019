//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use flock_core::FlockConfig;
use std::path::PathBuf;

pub mod forms;
pub mod serve;

/// Flock - create/edit forms for the congregation admin
#[derive(Parser)]
#[command(name = "flock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "flock.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the form server
    Serve(serve::ServeArgs),

    /// Inspect form definitions
    #[command(subcommand)]
    Forms(forms::FormsCommands),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = FlockConfig::load(&self.config)?;

        match self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Forms(cmd) => forms::execute(cmd, &config),
        }
    }
}
