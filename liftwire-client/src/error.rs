//! API error classification.
//!
//! Raw transport and HTTP failures are mapped into a closed taxonomy that
//! callers consume uniformly. Every classified error carries enough
//! context (url, method, status) to branch on without parsing strings.

use thiserror::Error;

/// Classified error for API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The transport could not reach the platform.
    #[error("Network error for {method} {url}: {message}")]
    Network {
        /// HTTP method of the failed call.
        method: String,
        /// Request URL.
        url: String,
        /// Transport error description.
        message: String,
    },

    /// The call exceeded its timeout.
    #[error("Request timed out: {method} {url}")]
    Timeout {
        /// HTTP method of the failed call.
        method: String,
        /// Request URL.
        url: String,
    },

    /// The platform answered with a non-2xx status.
    #[error("HTTP {status} {status_text} for {method} {url}")]
    Http {
        /// HTTP method of the failed call.
        method: String,
        /// Request URL.
        url: String,
        /// Response status code.
        status: u16,
        /// Canonical status text.
        status_text: String,
    },

    /// The response body did not match the endpoint's expected shape.
    #[error("Response validation failed for {method} {url}: {message}")]
    Validation {
        /// HTTP method of the call.
        method: String,
        /// Request URL.
        url: String,
        /// What failed to parse.
        message: String,
    },

    /// An authenticated call was made with no session in the store.
    #[error("No active session")]
    NoActiveSession,

    /// The session store itself failed.
    #[error("Session store error: {0}")]
    Store(#[from] liftwire_core::CoreError),

    /// Malformed call construction (bad URL path, unencodable header).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Classifies a transport-level failure from reqwest.
    pub fn from_transport(method: &str, url: &str, error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                method: method.to_string(),
                url: url.to_string(),
            }
        } else {
            Self::Network {
                method: method.to_string(),
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }

    /// Classifies a non-2xx response status.
    pub fn from_status(method: &str, url: &str, status: reqwest::StatusCode) -> Self {
        Self::Http {
            method: method.to_string(),
            url: url.to_string(),
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
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
    fn test_status_classification_carries_context() {
        let err = ApiError::from_status(
            "GET",
            "https://api.pulsetrack.app/api/v1/workouts",
            reqwest::StatusCode::NOT_FOUND,
        );
        match err {
            ApiError::Http {
                method,
                url,
                status,
                status_text,
            } => {
                assert_eq!(method, "GET");
                assert!(url.contains("/workouts"));
                assert_eq!(status, 404);
                assert_eq!(status_text, "Not Found");
            }
            other => panic!("expected Http, got {other:?}"),
        }
    }

    #[test]
    fn test_display_is_branchable_free() {
        let err = ApiError::NoActiveSession;
        assert_eq!(err.to_string(), "No active session");
    }
}
