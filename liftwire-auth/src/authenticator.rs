//! Session lifecycle on top of the login flow.

use std::sync::Arc;

use liftwire_core::{Credentials, Session, SessionStore};
use tracing::{info, instrument};

use crate::config::WebAuthConfig;
use crate::error::AuthError;
use crate::flow::LoginFlow;

/// Couples the login flow with a session store.
///
/// The store always holds the result of the most recent successful flow:
/// login and refresh supersede the stored session wholesale, logout
/// clears it. Nothing here ever persists the credentials themselves.
pub struct Authenticator {
    flow: LoginFlow,
    store: Arc<dyn SessionStore>,
}

impl Authenticator {
    /// Creates an authenticator writing sessions to `store`.
    pub fn new(config: WebAuthConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            flow: LoginFlow::new(config),
            store,
        }
    }

    /// Returns the current stored session, if any.
    pub async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.store.get().await?)
    }

    /// Runs the browser login flow and stores the resulting session.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let session = self.flow.login(credentials).await?;
        self.store.set(session.clone()).await?;
        Ok(session)
    }

    /// Re-runs the login flow, replacing whatever session is stored.
    ///
    /// The platform's refresh tokens are not usable outside the app, so a
    /// refresh is a full re-login that supersedes the session wholesale.
    pub async fn refresh(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        info!("Refreshing session via re-login");
        self.login(credentials).await
    }

    /// Clears the stored session.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.store.clear().await?;
        info!("Session cleared");
        Ok(())
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("flow", &self.flow)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
