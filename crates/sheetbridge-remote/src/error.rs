//! Remote API error types

use thiserror::Error;

/// Result type for remote API operations
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

/// Errors that can occur while reading from the remote API
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport failure (connection, TLS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body is not the expected JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response has no grid data where one was requested
    #[error("Missing grid data: {0}")]
    MissingData(String),

    /// Row/column bounds are not a valid 1-based rectangle
    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    /// Credentials are missing or malformed
    #[error("Credentials: {0}")]
    Credentials(String),

    /// The base URL cannot carry a spreadsheet path
    #[error("Invalid URL: {0}")]
    Url(String),
}
