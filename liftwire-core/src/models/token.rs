//! Bearer token recovered from intercepted network traffic.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// An access token for the platform's private APIs.
///
/// Immutable once constructed. The platform does not issue tokens through
/// any public endpoint, so every `AuthToken` is derived from a token
/// response intercepted during the browser login flow. The platform also
/// does not reliably report token expiry, so `expires_at` is computed from
/// a configured default window at capture time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    /// The bearer access token.
    pub access_token: String,
    /// Token type, effectively always `"Bearer"`.
    pub token_type: String,
    /// Locally computed expiry time.
    pub expires_at: DateTime<Utc>,
    /// Refresh token, when the platform supplied one.
    pub refresh_token: Option<String>,
}

impl AuthToken {
    /// Creates a bearer token expiring `ttl` from now.
    pub fn bearer(access_token: impl Into<String>, ttl: Duration) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "Bearer".to_string(),
            expires_at: Utc::now() + ttl,
            refresh_token: None,
        }
    }

    /// Sets the refresh token.
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Returns true if the token's computed expiry has passed.
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }

    /// Renders the `Authorization` header value for this token.
    pub fn authorization_value(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

// ============================================================================
// Tests
// ============================================================================
