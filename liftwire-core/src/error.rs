//! Core error types for liftwire.

use thiserror::Error;

/// Core error type for liftwire operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid data from an API response.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session store failure.
    #[error("Session store error: {0}")]
    Store(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
