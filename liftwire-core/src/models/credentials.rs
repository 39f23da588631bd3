//! Login credentials.

use std::fmt;

/// Credentials for one login attempt.
///
/// Transient by design: a `Credentials` value exists only for the duration
/// of a single login call and is never persisted. The `Debug` impl redacts
/// the password so the value is safe to log.
#[derive(Clone)]
pub struct Credentials {
    /// Account username or email address.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Creates credentials for a login attempt.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
