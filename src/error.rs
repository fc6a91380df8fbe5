// src/error.rs
// Standardized error types for Tally

use thiserror::Error;

/// Main error type for the Tally library
#[derive(Error, Debug)]
pub enum TallyError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("lookup failed: {0}")]
    Lookup(String),

    #[error("submission failed: {0}")]
    Submission(String),

    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Result using TallyError
pub type Result<T> = std::result::Result<T, TallyError>;

impl From<TallyError> for String {
    fn from(err: TallyError) -> Self {
        err.to_string()
    }
}
