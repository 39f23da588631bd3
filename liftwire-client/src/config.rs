//! HTTP client configuration.

use std::time::Duration;

use crate::retry::RetryPolicy;

/// Default API base URL. The trailing slash matters for URL joining.
const DEFAULT_BASE_URL: &str = "https://api.pulsetrack.app/api/v1/";

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for liftwire.
const USER_AGENT: &str = concat!("liftwire/", env!("CARGO_PKG_VERSION"));

/// Settings for the HTTP execution engine.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL relative paths are joined against.
    pub base_url: String,
    /// Default per-request timeout.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Retry policy for transient failures.
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the default request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert!(config.base_url.ends_with('/'));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("liftwire/"));
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::new()
            .with_base_url("https://staging.pulsetrack.app/api/v1/")
            .with_timeout(Duration::from_secs(5))
            .with_retry(RetryPolicy::no_retry());
        assert!(config.base_url.contains("staging"));
        assert_eq!(config.retry.max_retries, 0);
    }
}
