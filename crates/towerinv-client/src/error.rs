//! Error types for the inventory client

use thiserror::Error;

/// Errors that can occur when reading from the remote source
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// API returned an error status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from server
        message: String,
    },

    /// Login did not yield a token
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// A resource lacks a locator needed to follow it
    #[error("{resource} '{name}' has no related {locator} link")]
    MissingLocator {
        /// Resource kind (group, host)
        resource: &'static str,
        /// Resource name
        name: String,
        /// Locator key
        locator: &'static str,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
