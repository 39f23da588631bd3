//! Authentication error types.

use thiserror::Error;

/// Error type for the browser-driven authentication flow.
///
/// Every stage of the login flow fails into exactly one of these variants,
/// so callers get one failure mode per attempt and can branch without
/// parsing strings.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The browser could not be provisioned. Fatal and never retried:
    /// launch failures are environmental (missing binary, broken sandbox).
    #[error("Browser launch failed: {0}")]
    BrowserLaunch(String),

    /// A navigation or URL wait did not settle within its timeout.
    #[error("Timed out waiting for {target}")]
    NavigationTimeout {
        /// The URL or URL pattern that never arrived.
        target: String,
    },

    /// Every selector in a fallback chain was exhausted.
    #[error("No element found for any of: {}", attempted.join(", "))]
    ElementNotFound {
        /// All attempted selectors, in the order they were tried.
        attempted: Vec<String>,
    },

    /// The platform rendered an inline login error.
    #[error("Login rejected: {message}")]
    InvalidCredentials {
        /// The platform's displayed error text, verbatim.
        message: String,
    },

    /// The flow completed without tripping any step, but the capture
    /// buffer is incomplete. Guards against UI flows that silently change
    /// without breaking any selector.
    #[error("Authentication data missing after login flow: {missing}")]
    DataMissing {
        /// Which captured value(s) never arrived.
        missing: &'static str,
    },

    /// Invalid flow configuration (bad URL pattern, malformed login URL).
    #[error("Invalid auth configuration: {0}")]
    InvalidConfig(String),

    /// A CDP command or event subscription failed.
    #[error("Browser protocol error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    /// The session store rejected a lifecycle operation.
    #[error("Session store error: {0}")]
    Store(#[from] liftwire_core::CoreError),
}
