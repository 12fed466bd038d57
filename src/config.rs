//! Configuration management and validation.
//!
//! Provides the layered configuration for the marker server: built-in
//! defaults, environment variable overrides, and finally CLI argument
//! overrides applied by the command layer.

use crate::constants::{DEFAULT_DATA_DIR, DEFAULT_HOST, DEFAULT_PORT, ENV_DATA_DIR, ENV_HOST, ENV_PORT};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tracing::debug;

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener
    pub host: String,

    /// TCP port for the HTTP listener
    pub port: u16,
}

/// Collection storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON document per collection key
    pub data_dir: PathBuf,
}

/// Global configuration for the marker server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Collection storage settings
    pub storage: StorageConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
            },
            storage: StorageConfig {
                data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            },
        }
    }
}

impl Config {
    /// Load configuration from defaults with environment overrides applied
    ///
    /// Recognized variables: `MARKER_HOST`, `MARKER_PORT`, `MARKER_DATA_DIR`.
    /// CLI overrides are layered on top by the command layer.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var(ENV_HOST) {
            config.server.host = host;
        }

        if let Ok(port) = std::env::var(ENV_PORT) {
            config.server.port = port.parse().map_err(|_| {
                Error::configuration(format!("Invalid {} value: {}", ENV_PORT, port))
            })?;
        }

        if let Ok(data_dir) = std::env::var(ENV_DATA_DIR) {
            config.storage.data_dir = PathBuf::from(data_dir);
        }

        debug!(
            "Configuration loaded: {}:{}, data dir {}",
            config.server.host,
            config.server.port,
            config.storage.data_dir.display()
        );

        Ok(config)
    }

    /// Create configuration with a custom bind host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.server.host = host.into();
        self
    }

    /// Create configuration with a custom port
    pub fn with_port(mut self, port: u16) -> Self {
        self.server.port = port;
        self
    }

    /// Create configuration with a custom data directory
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.storage.data_dir = data_dir.into();
        self
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(Error::configuration(
                "Bind host cannot be empty".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(Error::configuration(
                "Port must be greater than 0".to_string(),
            ));
        }

        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(Error::configuration(
                "Data directory cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Resolve the configured host and port into a socket address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.server.host.parse().map_err(|_| {
            Error::configuration(format!("Invalid bind host: {}", self.server.host))
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}
