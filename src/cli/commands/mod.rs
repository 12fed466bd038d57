//! Command implementations for the marker server CLI
//!
//! This module contains the command execution logic and shared setup for
//! the CLI interface. Each command is implemented in its own module.

pub mod export;
pub mod serve;
pub mod shared;

use crate::cli::args::{Args, Commands};
use crate::Result;

/// Main command runner for the marker server
///
/// Dispatches to the appropriate subcommand handler based on CLI args:
/// - `serve`: run the HTTP API server
/// - `export`: write a collection's xlsx projection to a local file
pub async fn run(args: Args) -> Result<()> {
    match args.get_command() {
        Commands::Serve(serve_args) => serve::run_serve(serve_args).await,
        Commands::Export(export_args) => export::run_export(export_args).await,
    }
}
