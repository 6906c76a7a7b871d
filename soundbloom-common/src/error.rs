//! Common error types for SoundBloom

use thiserror::Error;

use crate::catalog::ScanError;

/// Common result type for SoundBloom operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across SoundBloom crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode error at a persistence or transfer boundary
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Sound directory enumeration failed; no partial catalog is produced
    #[error("Catalog error: {0}")]
    Catalog(#[from] ScanError),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
