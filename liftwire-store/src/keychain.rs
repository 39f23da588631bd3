//! Keychain-backed session store.
//!
//! Stores the serialized session in the system's secure credential storage:
//! - macOS: Keychain Services
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring, KDE Wallet)
//!
//! The keyring API is blocking, so calls are moved off the async runtime
//! with `spawn_blocking`.

use async_trait::async_trait;
use keyring::Entry;
use liftwire_core::{CoreError, Session, SessionStore};
use tracing::debug;

use crate::error::StoreError;

/// Keychain service name for liftwire sessions.
const SERVICE: &str = "liftwire";

/// Keychain account name the session is stored under.
const ACCOUNT: &str = "session";

/// Session store backed by the OS keychain.
#[derive(Debug, Clone, Default)]
pub struct KeychainSessionStore;

impl KeychainSessionStore {
    /// Creates a keychain store.
    pub fn new() -> Self {
        Self
    }

    fn entry() -> Result<Entry, StoreError> {
        Entry::new(SERVICE, ACCOUNT).map_err(StoreError::from)
    }

    fn load_blocking() -> Result<Option<Session>, StoreError> {
        match Self::entry()?.get_password() {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save_blocking(session: &Session) -> Result<(), StoreError> {
        let json = serde_json::to_string(session)?;
        Self::entry()?.set_password(&json)?;
        debug!("Session saved to keychain");
        Ok(())
    }

    fn clear_blocking() -> Result<(), StoreError> {
        match Self::entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => {
                debug!("Session removed from keychain");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl SessionStore for KeychainSessionStore {
    async fn get(&self) -> Result<Option<Session>, CoreError> {
        tokio::task::spawn_blocking(Self::load_blocking)
            .await
            .map_err(|e| CoreError::Store(e.to_string()))?
            .map_err(CoreError::from)
    }

    async fn set(&self, session: Session) -> Result<(), CoreError> {
        tokio::task::spawn_blocking(move || Self::save_blocking(&session))
            .await
            .map_err(|e| CoreError::Store(e.to_string()))?
            .map_err(CoreError::from)
    }

    async fn clear(&self) -> Result<(), CoreError> {
        tokio::task::spawn_blocking(Self::clear_blocking)
            .await
            .map_err(|e| CoreError::Store(e.to_string()))?
            .map_err(CoreError::from)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_creation() {
        let _store = KeychainSessionStore::new();
    }

    // Read/write tests need a real keychain and would prompt on macOS, so
    // only the entry construction is exercised here.
    #[test]
    fn test_entry_construction() {
        let _ = KeychainSessionStore::entry();
    }
}
