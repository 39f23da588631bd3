//! The uniform result of one HTTP call.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Tagged outcome of one call through the execution engine.
///
/// Ordinary HTTP failures (4xx, 5xx, timeouts, connection errors) are
/// values of this type, never panics, so callers branch without
/// exception-style handling for expected conditions.
#[derive(Debug)]
pub enum HttpOutcome {
    /// The platform answered 2xx.
    Success {
        /// HTTP method of the call.
        method: String,
        /// Request URL.
        url: String,
        /// Response status.
        status: StatusCode,
        /// Parsed JSON body, `Null` when the body was empty or not JSON.
        data: Value,
        /// `Set-Cookie` values the response carried.
        cookies: Vec<String>,
    },
    /// The call failed with a classified error.
    Failure {
        /// HTTP method of the call.
        method: String,
        /// Request URL.
        url: String,
        /// Response status, when a response arrived at all.
        status: Option<StatusCode>,
        /// The classified error.
        error: ApiError,
        /// `Set-Cookie` values, when a response arrived.
        cookies: Vec<String>,
    },
}

impl HttpOutcome {
    /// Returns true for a 2xx outcome.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The response status, if a response arrived.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Success { status, .. } => Some(*status),
            Self::Failure { status, .. } => *status,
        }
    }

    /// The response data for a success, `None` otherwise.
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    /// The classified error for a failure, `None` otherwise.
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }

    /// The `Set-Cookie` values the response carried.
    pub fn cookies(&self) -> &[String] {
        match self {
            Self::Success { cookies, .. } | Self::Failure { cookies, .. } => cookies,
        }
    }

    /// Converts the outcome into a plain result over the raw JSON body.
    pub fn into_result(self) -> Result<Value, ApiError> {
        match self {
            Self::Success { data, .. } => Ok(data),
            Self::Failure { error, .. } => Err(error),
        }
    }

    /// Deserializes a success body into `T`.
    ///
    /// A body that does not match the expected shape classifies as
    /// [`ApiError::Validation`].
    pub fn parse<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            Self::Success {
                method, url, data, ..
            } => serde_json::from_value(data).map_err(|e| ApiError::Validation {
                method,
                url,
                message: e.to_string(),
            }),
            Self::Failure { error, .. } => Err(error),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn success(data: Value) -> HttpOutcome {
        HttpOutcome::Success {
            method: "GET".to_string(),
            url: "https://api.pulsetrack.app/api/v1/thing".to_string(),
            status: StatusCode::OK,
            data,
            cookies: vec!["sid=1".to_string()],
        }
    }

    #[derive(Debug, Deserialize)]
    struct Thing {
        name: String,
    }

    #[test]
    fn test_success_accessors() {
        let outcome = success(serde_json::json!({"name": "row"}));
        assert!(outcome.is_success());
        assert_eq!(outcome.status(), Some(StatusCode::OK));
        assert_eq!(outcome.cookies(), ["sid=1"]);
        assert!(outcome.error().is_none());
    }

    #[test]
    fn test_parse_success() {
        let thing: Thing = success(serde_json::json!({"name": "row"})).parse().unwrap();
        assert_eq!(thing.name, "row");
    }

    #[test]
    fn test_parse_shape_mismatch_is_validation() {
        let result: Result<Thing, _> = success(serde_json::json!({"nom": "row"})).parse();
        assert!(matches!(result, Err(ApiError::Validation { .. })));
    }

    #[test]
    fn test_failure_propagates_error() {
        let outcome = HttpOutcome::Failure {
            method: "GET".to_string(),
            url: "https://api.pulsetrack.app/api/v1/thing".to_string(),
            status: Some(StatusCode::UNAUTHORIZED),
            error: ApiError::NoActiveSession,
            cookies: Vec::new(),
        };
        assert!(!outcome.is_success());
        assert_eq!(outcome.status(), Some(StatusCode::UNAUTHORIZED));
        assert!(matches!(
            outcome.into_result(),
            Err(ApiError::NoActiveSession)
        ));
    }
}
