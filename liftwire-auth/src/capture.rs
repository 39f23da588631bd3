//! The attempt-scoped capture buffer and response inspection.
//!
//! The platform issues its bearer token and user identity only as side
//! effects of the login page's own background API calls. Interception is
//! passive: responses matching known path fragments are best-effort
//! parsed, everything else on the page is ignored.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use liftwire_core::AuthToken;
use serde::Deserialize;
use tracing::{debug, trace};

// ============================================================================
// Capture Buffer
// ============================================================================

/// Mutable accumulator for one login attempt.
///
/// Written by the network interceptor while the flow runs, read by the
/// session synthesizer after it completes. One buffer per attempt —
/// concurrent attempts never share a buffer (or a browser page), so no
/// cross-attempt state exists.
#[derive(Debug, Default)]
pub struct CaptureBuffer {
    /// Token recovered from a token-issuing response.
    pub token: Option<AuthToken>,
    /// User identifier recovered from a user-profile response.
    pub user_id: Option<String>,
}

impl CaptureBuffer {
    /// Returns true once both token and user id have been captured.
    pub fn is_complete(&self) -> bool {
        self.token.is_some() && self.user_id.is_some()
    }
}

/// Shared handle to an attempt's capture buffer.
///
/// Allocated by the flow driver and handed into the interceptor's event
/// tasks; never a process-wide singleton.
pub type SharedCapture = Arc<Mutex<CaptureBuffer>>;

/// Allocates a fresh capture buffer for one attempt.
pub fn new_shared_capture() -> SharedCapture {
    Arc::new(Mutex::new(CaptureBuffer::default()))
}

/// Locks a capture buffer, recovering from a poisoned lock.
///
/// Interceptor tasks only ever perform field writes under the lock, so a
/// poisoned buffer still holds usable data.
pub(crate) fn lock_capture(capture: &SharedCapture) -> std::sync::MutexGuard<'_, CaptureBuffer> {
    capture.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Wire Shapes
// ============================================================================

// Token responses look like `{ "token": { "access_token": "...",
// "refresh_token": "..." } }`. Many unrelated responses also match the URL
// fragment filters, so both shapes are parsed leniently and silently
// skipped on mismatch.

#[derive(Debug, Deserialize)]
struct TokenEnvelope {
    token: Option<TokenBody>,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: Option<UserBody>,
}

#[derive(Debug, Deserialize)]
struct UserBody {
    #[serde(rename = "userId")]
    user_id: Option<serde_json::Value>,
}

// ============================================================================
// Response Inspection
// ============================================================================

/// Matching rules handed to [`apply_response`].
#[derive(Debug, Clone)]
pub struct CaptureRules {
    /// URL fragment of token-issuing responses.
    pub token_path_fragment: String,
    /// URL fragment of user-profile responses.
    pub user_path_fragment: String,
    /// Expiry window applied to captured tokens.
    pub token_ttl: Duration,
}

impl CaptureRules {
    /// Returns true if a response to `url` is worth fetching a body for.
    pub fn matches(&self, url: &str) -> bool {
        url.contains(&self.token_path_fragment) || url.contains(&self.user_path_fragment)
    }
}

/// Inspects one intercepted response body and updates the capture buffer.
///
/// Non-JSON or unexpectedly shaped bodies are logged and ignored; the
/// same page emits many unrelated responses and none of them may abort
/// the flow.
pub fn apply_response(rules: &CaptureRules, url: &str, body: &str, capture: &SharedCapture) {
    if url.contains(&rules.token_path_fragment) {
        apply_token_response(rules, url, body, capture);
    }
    if url.contains(&rules.user_path_fragment) {
        apply_user_response(url, body, capture);
    }
}

fn apply_token_response(rules: &CaptureRules, url: &str, body: &str, capture: &SharedCapture) {
    let envelope: TokenEnvelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            trace!(url = %url, error = %e, "Ignoring unparseable token-path response");
            return;
        }
    };

    let Some(token_body) = envelope.token else {
        trace!(url = %url, "Token-path response without token object, ignoring");
        return;
    };
    let Some(access_token) = token_body.access_token.filter(|t| !t.is_empty()) else {
        trace!(url = %url, "Token-path response without access_token, ignoring");
        return;
    };

    let ttl = chrono::Duration::from_std(rules.token_ttl)
        .unwrap_or_else(|_| chrono::Duration::hours(6));
    let mut token = AuthToken::bearer(access_token, ttl);
    if let Some(refresh) = token_body.refresh_token.filter(|r| !r.is_empty()) {
        token = token.with_refresh_token(refresh);
    }

    debug!(url = %url, "Captured access token");
    lock_capture(capture).token = Some(token);
}

fn apply_user_response(url: &str, body: &str, capture: &SharedCapture) {
    let envelope: UserEnvelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            trace!(url = %url, error = %e, "Ignoring unparseable user-path response");
            return;
        }
    };

    let Some(user_id) = envelope.user.and_then(|u| u.user_id) else {
        trace!(url = %url, "User-path response without userId, ignoring");
        return;
    };

    // The platform sometimes reports the id as a number; coerce to string.
    let user_id = match user_id {
        serde_json::Value::String(s) if !s.is_empty() => s,
        serde_json::Value::Number(n) => n.to_string(),
        other => {
            trace!(url = %url, value = %other, "Unusable userId value, ignoring");
            return;
        }
    };

    debug!(url = %url, user_id = %user_id, "Captured user id");
    lock_capture(capture).user_id = Some(user_id);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> CaptureRules {
        CaptureRules {
            token_path_fragment: "/auth/token".to_string(),
            user_path_fragment: "/users/current".to_string(),
            token_ttl: Duration::from_secs(3600),
        }
    }

    #[test]
    fn test_token_response_captured() {
        let capture = new_shared_capture();
        apply_response(
            &rules(),
            "https://api.pulsetrack.app/auth/token",
            r#"{"token":{"access_token":"abc","refresh_token":"r1"}}"#,
            &capture,
        );

        let buffer = capture.lock().unwrap();
        let token = buffer.token.as_ref().unwrap();
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.refresh_token.as_deref(), Some("r1"));
        assert_eq!(token.token_type, "Bearer");
    }

    #[test]
    fn test_numeric_user_id_coerced_to_string() {
        let capture = new_shared_capture();
        apply_response(
            &rules(),
            "https://api.pulsetrack.app/users/current",
            r#"{"user":{"userId":123}}"#,
            &capture,
        );

        assert_eq!(capture.lock().unwrap().user_id.as_deref(), Some("123"));
    }

    #[test]
    fn test_string_user_id_kept() {
        let capture = new_shared_capture();
        apply_response(
            &rules(),
            "https://api.pulsetrack.app/users/current",
            r#"{"user":{"userId":"u-9"}}"#,
            &capture,
        );

        assert_eq!(capture.lock().unwrap().user_id.as_deref(), Some("u-9"));
    }

    #[test]
    fn test_malformed_body_ignored() {
        let capture = new_shared_capture();
        apply_response(
            &rules(),
            "https://api.pulsetrack.app/auth/token",
            "<html>not json</html>",
            &capture,
        );

        let buffer = capture.lock().unwrap();
        assert!(buffer.token.is_none());
        assert!(buffer.user_id.is_none());
    }

    #[test]
    fn test_unrelated_url_ignored() {
        let capture = new_shared_capture();
        apply_response(
            &rules(),
            "https://cdn.pulsetrack.app/assets/app.js",
            r#"{"token":{"access_token":"abc"}}"#,
            &capture,
        );

        assert!(capture.lock().unwrap().token.is_none());
    }

    #[test]
    fn test_token_shape_without_access_token_ignored() {
        let capture = new_shared_capture();
        apply_response(
            &rules(),
            "https://api.pulsetrack.app/auth/token/metadata",
            r#"{"token":{"kind":"opaque"}}"#,
            &capture,
        );

        assert!(capture.lock().unwrap().token.is_none());
    }

    #[test]
    fn test_completeness() {
        let capture = new_shared_capture();
        assert!(!capture.lock().unwrap().is_complete());

        apply_response(
            &rules(),
            "https://api.pulsetrack.app/auth/token",
            r#"{"token":{"access_token":"abc"}}"#,
            &capture,
        );
        assert!(!capture.lock().unwrap().is_complete());

        apply_response(
            &rules(),
            "https://api.pulsetrack.app/users/current",
            r#"{"user":{"userId":42}}"#,
            &capture,
        );
        assert!(capture.lock().unwrap().is_complete());
    }

    #[test]
    fn test_rules_match() {
        let rules = rules();
        assert!(rules.matches("https://api.pulsetrack.app/auth/token"));
        assert!(rules.matches("https://api.pulsetrack.app/users/current?full=1"));
        assert!(!rules.matches("https://api.pulsetrack.app/workouts"));
    }
}
