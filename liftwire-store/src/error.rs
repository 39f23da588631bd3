//! Store error types.

use liftwire_core::CoreError;
use thiserror::Error;

/// Error type for session store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored session payload failed to parse.
    #[error("Corrupt session data: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// Keychain failure.
    #[error("Keychain error: {0}")]
    Keychain(String),

    /// No usable storage location on this system.
    #[error("No storage location available: {0}")]
    NoLocation(String),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        CoreError::Store(err.to_string())
    }
}

impl From<keyring::Error> for StoreError {
    fn from(err: keyring::Error) -> Self {
        StoreError::Keychain(err.to_string())
    }
}
