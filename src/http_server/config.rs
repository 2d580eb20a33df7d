//! Gateway configuration
//!
//! Loaded from an optional JSON file; command-line flags and their
//! environment fallbacks override file values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    Invalid(String),
}

/// Gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3005)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database snapshot file (required)
    #[serde(default)]
    pub database_file: Option<PathBuf>,

    /// Shared secret every request must present (required)
    #[serde(default)]
    pub api_token: Option<String>,

    /// Emit one QUERY_EXECUTED record per dispatched statement
    #[serde(default)]
    pub audit_log: bool,

    /// Show unexpected error messages to callers and log error causes
    #[serde(default)]
    pub development: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3005
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_file: None,
            api_token: None,
            audit_log: false,
            development: false,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Check that everything required to serve is present
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.database_file {
            Some(path) if !path.as_os_str().is_empty() => {}
            _ => return Err(ConfigError::Invalid("database_file is required".to_string())),
        }

        match &self.api_token {
            Some(token) if !token.is_empty() => {}
            _ => return Err(ConfigError::Invalid("api_token is required".to_string())),
        }

        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
