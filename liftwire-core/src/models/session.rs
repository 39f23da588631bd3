//! The authenticated session.

use serde::{Deserialize, Serialize};

use super::token::AuthToken;
use super::user::User;

/// The authenticated unit of identity + token handed to the HTTP layer.
///
/// A session is constructed atomically from a fully populated capture (both
/// token and user id present) or not at all; it is never observable in a
/// partially populated state. The session lifecycle is owned by whatever
/// [`crate::SessionStore`] the caller configures: created on login success,
/// cleared on logout, superseded wholesale on re-login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Token injected into every authenticated request.
    pub token: AuthToken,
    /// The user this session belongs to.
    pub user: User,
}

impl Session {
    /// Creates a session from a token and a user record.
    pub fn new(token: AuthToken, user: User) -> Self {
        Self { token, user }
    }

    /// Returns true if the session's token has expired.
    pub fn is_expired(&self) -> bool {
        self.token.is_expired()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_session_round_trip() {
        let session = Session::new(
            AuthToken::bearer("abc", Duration::hours(6)),
            User::minimal("123"),
        );
        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(session, back);
    }

    #[test]
    fn test_expiry_follows_token() {
        let session = Session::new(
            AuthToken::bearer("abc", Duration::hours(-1)),
            User::minimal("123"),
        );
        assert!(session.is_expired());
    }
}
