//! Error types for Quill.

use thiserror::Error;

/// Common error type for Quill.
#[derive(Error, Debug)]
pub enum QuillError {
    /// Database error.
    ///
    /// Wraps errors from any database backend; sqlx errors are converted
    /// automatically.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error (bad credentials, invalid session).
    #[error("authentication error: {0}")]
    Auth(String),

    /// Permission denied error.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Conflict with an existing resource (duplicate email, etc.).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for QuillError {
    fn from(e: sqlx::Error) -> Self {
        QuillError::Database(e.to_string())
    }
}

/// Result type alias for Quill operations.
pub type Result<T> = std::result::Result<T, QuillError>;
