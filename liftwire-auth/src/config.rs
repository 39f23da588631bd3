//! Web authentication configuration.

use std::path::PathBuf;
use std::time::Duration;

use regex::Regex;

use crate::error::AuthError;

/// Default login page URL.
const DEFAULT_LOGIN_URL: &str = "https://www.pulsetrack.app/login";

/// Default pattern the page URL must match once the app has loaded.
const DEFAULT_APP_URL_PATTERN: &str = r"^https://app\.pulsetrack\.app/";

/// URL fragment identifying the platform's token-issuing responses.
const DEFAULT_TOKEN_PATH_FRAGMENT: &str = "/auth/token";

/// URL fragment identifying the platform's user-profile responses.
const DEFAULT_USER_PATH_FRAGMENT: &str = "/users/current";

/// Configuration for the browser-driven login flow.
///
/// Timeouts, URLs, and selector chains all have working defaults for the
/// current platform deployment; everything is overridable because the
/// platform's markup is not contractually stable.
#[derive(Debug, Clone)]
pub struct WebAuthConfig {
    /// Login page URL.
    pub login_url: String,
    /// Regex the page URL must match for the flow to count as completed.
    pub app_url_pattern: String,
    /// Timeout for browser provisioning.
    pub launch_timeout: Duration,
    /// Timeout for page navigations.
    pub navigation_timeout: Duration,
    /// Timeout for the first selector candidate of a chain.
    pub element_timeout: Duration,
    /// Timeout for each fallback selector candidate after the first.
    pub fallback_timeout: Duration,
    /// Timeout for the best-effort consent dismissal.
    pub consent_timeout: Duration,
    /// How long to let the page settle after form submission before the
    /// inline-error scan. Failed logins never navigate, so this stays
    /// short.
    pub submit_settle_timeout: Duration,
    /// Timeout for the authenticated-app URL to appear after submission.
    pub completion_timeout: Duration,
    /// Fixed grace period after completion, letting in-flight API calls
    /// reach the interceptor.
    pub completion_grace: Duration,
    /// Run the browser headless.
    pub headless: bool,
    /// Explicit Chromium executable. Auto-detected when unset.
    pub chrome_executable: Option<PathBuf>,
    /// Extra command-line arguments for the browser process.
    pub extra_browser_args: Vec<String>,
    /// Expiry window applied to captured tokens. The platform does not
    /// report token lifetimes, so this is a placeholder, not a protocol
    /// guarantee.
    pub default_token_ttl: Duration,
    /// URL fragment of token-issuing responses.
    pub token_path_fragment: String,
    /// URL fragment of user-profile responses.
    pub user_path_fragment: String,
    /// Selector for the username field.
    pub username_selector: String,
    /// Fallback chain for the password field.
    pub password_selectors: Vec<String>,
    /// Fallback chain for the submit control.
    pub submit_selectors: Vec<String>,
    /// Fallback chain for the cookie-consent control.
    pub consent_selectors: Vec<String>,
    /// Inline login-error regions scanned after submission. Several of
    /// these may be legacy markup; all are kept and checked in order.
    pub login_error_selectors: Vec<String>,
}

impl Default for WebAuthConfig {
    fn default() -> Self {
        Self {
            login_url: DEFAULT_LOGIN_URL.to_string(),
            app_url_pattern: DEFAULT_APP_URL_PATTERN.to_string(),
            launch_timeout: Duration::from_secs(20),
            navigation_timeout: Duration::from_secs(30),
            element_timeout: Duration::from_secs(10),
            fallback_timeout: Duration::from_millis(1500),
            consent_timeout: Duration::from_secs(2),
            submit_settle_timeout: Duration::from_secs(3),
            completion_timeout: Duration::from_secs(45),
            completion_grace: Duration::from_millis(1500),
            headless: true,
            chrome_executable: None,
            extra_browser_args: Vec::new(),
            default_token_ttl: Duration::from_secs(6 * 60 * 60),
            token_path_fragment: DEFAULT_TOKEN_PATH_FRAGMENT.to_string(),
            user_path_fragment: DEFAULT_USER_PATH_FRAGMENT.to_string(),
            username_selector: "input[name=\"username\"]".to_string(),
            password_selectors: vec![
                "[data-cy=password]".to_string(),
                "#Password".to_string(),
                "input[type=password]".to_string(),
            ],
            submit_selectors: vec![
                "[data-cy=login-submit]".to_string(),
                "button[type=submit]".to_string(),
                "input[type=submit]".to_string(),
            ],
            consent_selectors: vec![
                "#onetrust-accept-btn-handler".to_string(),
                "button[aria-label=\"Accept all cookies\"]".to_string(),
                ".cookie-banner button.accept".to_string(),
            ],
            login_error_selectors: vec![
                "[data-cy=login-error]".to_string(),
                ".login-error".to_string(),
                ".field-validation-error".to_string(),
                ".alert-danger".to_string(),
            ],
        }
    }
}

impl WebAuthConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the login page URL.
    pub fn with_login_url(mut self, url: impl Into<String>) -> Self {
        self.login_url = url.into();
        self
    }

    /// Sets the authenticated-app URL pattern.
    pub fn with_app_url_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.app_url_pattern = pattern.into();
        self
    }

    /// Runs the browser with a visible window, for debugging the flow.
    pub fn with_headful(mut self) -> Self {
        self.headless = false;
        self
    }

    /// Sets an explicit Chromium executable.
    pub fn with_chrome_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_executable = Some(path.into());
        self
    }

    /// Sets the navigation timeout.
    pub fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    /// Sets the element wait timeout for first selector candidates.
    pub fn with_element_timeout(mut self, timeout: Duration) -> Self {
        self.element_timeout = timeout;
        self
    }

    /// Sets the token expiry window applied to captured tokens.
    pub fn with_default_token_ttl(mut self, ttl: Duration) -> Self {
        self.default_token_ttl = ttl;
        self
    }

    /// Compiles the authenticated-app URL pattern.
    pub fn app_url_regex(&self) -> Result<Regex, AuthError> {
        Regex::new(&self.app_url_pattern).map_err(|e| {
            AuthError::InvalidConfig(format!(
                "bad app URL pattern {:?}: {e}",
                self.app_url_pattern
            ))
        })
    }

    /// Validates the configuration, returning the first problem found.
    pub fn validate(&self) -> Result<(), AuthError> {
        url::Url::parse(&self.login_url)
            .map_err(|e| AuthError::InvalidConfig(format!("bad login URL {:?}: {e}", self.login_url)))?;
        self.app_url_regex()?;
        if self.password_selectors.is_empty() {
            return Err(AuthError::InvalidConfig(
                "password selector chain is empty".to_string(),
            ));
        }
        if self.submit_selectors.is_empty() {
            return Err(AuthError::InvalidConfig(
                "submit selector chain is empty".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        WebAuthConfig::default().validate().unwrap();
    }

    #[test]
    fn test_default_app_pattern_matches_app_urls() {
        let config = WebAuthConfig::default();
        let re = config.app_url_regex().unwrap();
        assert!(re.is_match("https://app.pulsetrack.app/dashboard"));
        assert!(!re.is_match("https://www.pulsetrack.app/login"));
    }

    #[test]
    fn test_bad_pattern_rejected() {
        let config = WebAuthConfig::default().with_app_url_pattern("(unclosed");
        assert!(matches!(
            config.validate(),
            Err(AuthError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_bad_login_url_rejected() {
        let config = WebAuthConfig::default().with_login_url("not a url");
        assert!(matches!(
            config.validate(),
            Err(AuthError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_all_legacy_error_selectors_present() {
        // The inline-error markup has changed across platform deployments;
        // every known variant must stay in the default chain.
        let config = WebAuthConfig::default();
        assert!(config.login_error_selectors.len() >= 4);
    }
}
