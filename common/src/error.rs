//! Error type for the shared library

use thiserror::Error;

/// Shared error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid recipe data: {0}")]
    Validation(String),
}

/// Result alias
pub type Result<T> = std::result::Result<T, Error>;
