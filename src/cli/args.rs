//! Command-line argument definitions for the marker server
//!
//! This module defines the complete CLI interface using the clap derive
//! API: the `serve` command runs the HTTP API, the `export` command
//! writes a collection's tabular projection to a local xlsx file.

use crate::app::models::CollectionKey;
use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the marker server
///
/// Manages map marker (station) records persisted as JSON documents,
/// exposed over an HTTP API with bulk list-field updates and xlsx export.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "marker-server",
    version,
    about = "JSON-backed CRUD service for map marker records",
    long_about = "A service that manages map marker (station) records persisted as JSON \
                  documents on disk. Exposes CRUD endpoints, bulk list-field updates with \
                  affected-id reporting, and a tabular xlsx export per collection."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the marker server
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),
    /// Write a collection's xlsx projection to a local file
    Export(ExportArgs),
}

/// Arguments for the serve command
#[derive(Debug, Clone, Parser)]
pub struct ServeArgs {
    /// Bind address for the HTTP listener
    ///
    /// Defaults to 0.0.0.0 (or MARKER_HOST when set); the flag wins over
    /// both.
    #[arg(
        long = "host",
        value_name = "ADDR",
        help = "Bind address for the HTTP listener"
    )]
    pub host: Option<String>,

    /// TCP port for the HTTP listener
    ///
    /// Defaults to 7000 (or MARKER_PORT when set); the flag wins over
    /// both.
    #[arg(
        short = 'p',
        long = "port",
        value_name = "PORT",
        help = "TCP port for the HTTP listener"
    )]
    pub port: Option<u16>,

    /// Directory holding the collection JSON documents
    ///
    /// Created if it doesn't exist. If not specified, defaults to ./data
    /// (or MARKER_DATA_DIR when set).
    #[arg(
        long = "data-dir",
        value_name = "PATH",
        help = "Directory holding the collection JSON documents"
    )]
    pub data_dir: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and critical messages. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the export command
#[derive(Debug, Clone, Parser)]
pub struct ExportArgs {
    /// Collection key to export (default, admin, admin_fleet)
    #[arg(value_name = "KEY", help = "Collection key to export")]
    pub key: String,

    /// Directory holding the collection JSON documents
    #[arg(
        long = "data-dir",
        value_name = "PATH",
        help = "Directory holding the collection JSON documents"
    )]
    pub data_dir: Option<PathBuf>,

    /// Output file for the workbook
    ///
    /// If not specified, writes {key}_stations.xlsx in the current
    /// directory.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output file for the workbook"
    )]
    pub output: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl ServeArgs {
    /// Validate the serve command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(host) = &self.host {
            if host.trim().is_empty() {
                return Err(Error::configuration(
                    "Bind host cannot be empty".to_string(),
                ));
            }
        }

        if self.port == Some(0) {
            return Err(Error::configuration(
                "Port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}

impl ExportArgs {
    /// Validate the export command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.key.parse::<CollectionKey>()?;

        if let Some(output) = &self.output {
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(Error::configuration(format!(
                        "Output directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
