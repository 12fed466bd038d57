//! Marker Server Library
//!
//! A Rust service for managing map marker (station) records persisted as
//! JSON documents on disk, exposed over an HTTP API.
//!
//! This library provides tools for:
//! - Loading and saving named marker collections with structural validation
//! - Matching records by string-normalized id
//! - Applying bulk list-field mutations, partial updates, replacements,
//!   creations, and deletions with per-record affected-id reporting
//! - Flattening collections into tabular xlsx exports
//! - Comprehensive error handling and recovery

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod export;
        pub mod marker_store;
        pub mod record_update;
    }
}

// HTTP server modules
pub mod server;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Collection, CollectionKey, Record};
pub use config::Config;

/// Result type alias for the marker server
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for marker server operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Persisted collection document exists but is not parseable
    #[error("Decode error: {message}")]
    Decode {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Collection document parsed but violates the structural invariant
    #[error("Structure error: {message}")]
    Structure { message: String },

    /// Configuration error (unknown collection key, bad settings)
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Malformed or incomplete update request
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Workbook rendering failed
    #[error("Export error: {message}")]
    Export { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an I/O error with a simple message
    pub fn io_error(message: impl Into<String>) -> Self {
        let message_str = message.into();
        Self::Io {
            message: message_str.clone(),
            source: std::io::Error::other(message_str),
        }
    }

    /// Create a decode error with context
    pub fn decode(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            message: message.into(),
            source,
        }
    }

    /// Create a structure error
    pub fn structure(message: impl Into<String>) -> Self {
        Self::Structure {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an export error
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
