//! Error types for record store operations.

/// Errors returned by record stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Credentials file missing or malformed.
    #[error("invalid store credentials: {0}")]
    Credentials(String),
    /// Backend refused or could not complete the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
