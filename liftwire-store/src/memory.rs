//! In-memory session store.

use async_trait::async_trait;
use liftwire_core::{CoreError, Session, SessionStore};
use tokio::sync::RwLock;
use tracing::debug;

/// Process-local session store.
///
/// The default choice for library embedders and tests. The session lives
/// only as long as the store value itself.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with a session.
    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self) -> Result<Option<Session>, CoreError> {
        Ok(self.session.read().await.clone())
    }

    async fn set(&self, session: Session) -> Result<(), CoreError> {
        debug!(user = %session.user.id, "Storing session in memory");
        *self.session.write().await = Some(session);
        Ok(())
    }

    async fn clear(&self) -> Result<(), CoreError> {
        debug!("Clearing in-memory session");
        *self.session.write().await = None;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
