//! Error types for manaba-sync.

use thiserror::Error;

/// Errors that can occur outside the pure extraction/reconciliation path.
#[derive(Error, Debug)]
pub enum ManabaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown time zone: {0}")]
    TimeZone(String),

    #[error("Invalid URL '{url}': {reason}")]
    Url { url: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for manaba-sync operations.
pub type ManabaResult<T> = Result<T, ManabaError>;
