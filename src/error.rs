use std::time::Duration;

use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from local filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Invalid repository path or `owner/repo` argument.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Transport-level failure talking to the remote store.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote store answered with a non-success status.
    #[error("Remote error ({status}): {message}")]
    Remote { status: u16, message: String },

    /// A response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A remote call did not finish within its deadline.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Logging or configuration setup failed.
    #[error("Config error: {0}")]
    Config(String),
}
