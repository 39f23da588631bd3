//! Session synthesis from a completed capture.

use liftwire_core::{Session, User};

use crate::capture::CaptureBuffer;
use crate::error::AuthError;

/// Builds the immutable session from a login attempt's capture buffer.
///
/// Pure data-completeness check: no I/O and no retries. A session is
/// constructed atomically from a fully populated capture or not at all,
/// even when no earlier stage reported a failure — this is the guard
/// against UI flows that silently change without tripping any selector.
pub fn synthesize_session(capture: &CaptureBuffer) -> Result<Session, AuthError> {
    match (&capture.token, &capture.user_id) {
        (Some(token), Some(user_id)) => {
            Ok(Session::new(token.clone(), User::minimal(user_id.clone())))
        }
        (None, Some(_)) => Err(AuthError::DataMissing {
            missing: "access token",
        }),
        (Some(_), None) => Err(AuthError::DataMissing { missing: "user id" }),
        (None, None) => Err(AuthError::DataMissing {
            missing: "access token and user id",
        }),
    }
}

// ============================================================================
// Tests
// ============================================================================
