//! User profile endpoint.

use liftwire_core::User;
use serde::Deserialize;
use tracing::instrument;

use super::ApiClient;
use crate::engine::RequestOptions;
use crate::error::ApiError;

/// Profile endpoint path.
const PROFILE_ENDPOINT: &str = "users/current";

/// Wire shape of the profile response.
#[derive(Debug, Deserialize)]
struct ProfileResponse {
    user: ProfilePayload,
}

#[derive(Debug, Deserialize)]
struct ProfilePayload {
    /// The platform reports the id as a string or a number depending on
    /// endpoint version.
    #[serde(rename = "userId")]
    user_id: serde_json::Value,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    avatar: Option<String>,
    #[serde(default)]
    preferences: Option<serde_json::Value>,
}

impl ProfilePayload {
    fn into_user(self) -> Result<User, String> {
        let id = match self.user_id {
            serde_json::Value::String(s) if !s.is_empty() => s,
            serde_json::Value::Number(n) => n.to_string(),
            other => return Err(format!("unusable userId: {other}")),
        };
        Ok(User {
            id,
            name: self.name.unwrap_or_default(),
            avatar: self.avatar,
            preferences: self.preferences,
        })
    }
}

impl ApiClient {
    /// Fetches the authenticated user's profile.
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<User, ApiError> {
        let outcome = self
            .engine()
            .get(PROFILE_ENDPOINT, RequestOptions::new())
            .await;
        let response: ProfileResponse = outcome.parse()?;
        response.user.into_user().map_err(|message| ApiError::Validation {
            method: "GET".to_string(),
            url: PROFILE_ENDPOINT.to_string(),
            message,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_parses_numeric_id() {
        let json = r#"{"user":{"userId":123,"name":"Jo Runner"}}"#;
        let response: ProfileResponse = serde_json::from_str(json).unwrap();
        let user = response.user.into_user().unwrap();
        assert_eq!(user.id, "123");
        assert_eq!(user.name, "Jo Runner");
    }

    #[test]
    fn test_profile_parses_string_id_and_extras() {
        let json = r#"{
            "user": {
                "userId": "u-9",
                "avatar": "https://cdn.pulsetrack.app/u-9.png",
                "preferences": {"units": "metric"}
            }
        }"#;
        let response: ProfileResponse = serde_json::from_str(json).unwrap();
        let user = response.user.into_user().unwrap();
        assert_eq!(user.id, "u-9");
        assert!(user.name.is_empty());
        assert!(user.avatar.is_some());
        assert!(user.preferences.is_some());
    }

    #[test]
    fn test_unusable_id_rejected() {
        let json = r#"{"user":{"userId":null}}"#;
        let response: ProfileResponse = serde_json::from_str(json).unwrap();
        assert!(response.user.into_user().is_err());
    }
}
