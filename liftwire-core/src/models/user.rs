//! Platform user profile.

use serde::{Deserialize, Serialize};

/// A PulseTrack user.
///
/// The login flow only learns the user's identifier from intercepted
/// traffic, so a freshly synthesized session carries a minimal record;
/// the remaining fields are filled in by a profile fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Platform user identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Free-form preference payload, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<serde_json::Value>,
}

impl User {
    /// Creates a minimal user record from just an identifier.
    pub fn minimal(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            avatar: None,
            preferences: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_user() {
        let user = User::minimal("123");
        assert_eq!(user.id, "123");
        assert!(user.name.is_empty());
        assert!(user.avatar.is_none());
    }

    #[test]
    fn test_deserialize_partial_profile() {
        let json = r#"{"id":"42","name":"Jo Runner"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.name, "Jo Runner");
        assert!(user.preferences.is_none());
    }
}
