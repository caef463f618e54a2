//! Error types for jobsniper.

use std::io;
use thiserror::Error;

/// Result type alias for jobsniper operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in jobsniper operations.
///
/// Validators never produce these; they report problems in their result
/// structs. Storage backends do, and the history facade swallows them.
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// SQLite error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// History record not found.
    #[error("Record not found: {0}")]
    RecordNotFound(i64),

    /// Caller supplied something unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
