//! Error types shared by the backend client, the session manager and the pages.

use thiserror::Error;

/// Result type for portal operations
pub type Result<T> = std::result::Result<T, PortalError>;

/// Errors surfaced by the portal
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PortalError {
    /// Credentials rejected or auth endpoint refused the request
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Request never reached the backend
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Local storage unavailable or rejected the write
    #[error("Storage error: {0}")]
    Storage(String),

    /// A single-row select matched zero or several rows
    #[error("Expected exactly one row, got {0}")]
    NotSingleRow(usize),

    /// Generic delete failure, the item is missing or protected
    #[error("Inventory item {0} could not be deleted")]
    InventoryNotDeleted(i64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<gloo_net::Error> for PortalError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => Self::Parse(e.to_string()),
            other => Self::Network(other.to_string()),
        }
    }
}
