//! Core error types for towerinv-core

use std::path::PathBuf;

use thiserror::Error;
use towerinv_client::ClientError;

/// Invalid or missing settings, detected before any network call
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Please set the environment variable TOWER_URL")]
    MissingUrl,

    #[error("Please set the environment variables TOWER_USERNAME and TOWER_PASSWORD")]
    MissingCredentials,

    #[error(
        "Please set the environment variable TOWER_INVENTORY_ID or use the argument --list-inventories to list available inventories"
    )]
    MissingInventoryId,

    /// A variable holds a value that cannot be interpreted
    #[error("invalid value '{value}' for {variable}: {reason}")]
    Invalid {
        variable: &'static str,
        value: String,
        reason: String,
    },

    /// Settings file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid TOML
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors that can occur while producing inventory output
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings are missing or invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A remote read failed
    #[error("remote read failed: {0}")]
    Client(#[from] ClientError),

    /// Output could not be serialized
    #[error("failed to serialize inventory: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
