//! The login flow driver.
//!
//! A single-pass state machine: `Idle → Launching → Navigating →
//! ConsentHandling → CredentialEntry → Submitting → AwaitingCompletion →
//! Done`, with `Failed` reachable from every state. Each stage has an
//! explicit timeout; timeouts are the only cancellation mechanism. The
//! browser is released on every exit path.

use std::fmt;
use std::time::{Duration, Instant};

use chromiumoxide::Page;
use liftwire_core::{Credentials, Session};
use tracing::{debug, error, info, instrument, warn};

use crate::browser::{self, BrowserSession};
use crate::capture::{lock_capture, new_shared_capture, SharedCapture};
use crate::config::WebAuthConfig;
use crate::error::AuthError;
use crate::interceptor::NetworkInterceptor;
use crate::selector::SelectorResolver;
use crate::synthesize::synthesize_session;

/// How often the page URL is re-checked while awaiting completion.
const COMPLETION_POLL_INTERVAL: Duration = Duration::from_millis(250);

// ============================================================================
// Login Stage
// ============================================================================

/// Stages of the login flow, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStage {
    /// Nothing has happened yet.
    Idle,
    /// Provisioning the browser.
    Launching,
    /// Navigating to the login page.
    Navigating,
    /// Dismissing the cookie-consent dialog (best effort).
    ConsentHandling,
    /// Filling the username and password fields.
    CredentialEntry,
    /// Submitting the form and checking for inline errors.
    Submitting,
    /// Waiting for the authenticated app URL.
    AwaitingCompletion,
    /// Flow finished; capture handed to the synthesizer.
    Done,
    /// Terminal failure state.
    Failed,
}

impl fmt::Display for LoginStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Launching => "launching",
            Self::Navigating => "navigating",
            Self::ConsentHandling => "consent-handling",
            Self::CredentialEntry => "credential-entry",
            Self::Submitting => "submitting",
            Self::AwaitingCompletion => "awaiting-completion",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        write!(f, "{name}")
    }
}

// ============================================================================
// Login Flow
// ============================================================================

/// Drives one browser login attempt against the platform.
///
/// One `login` call is one attempt. Attempts do not share browser
/// instances or capture buffers, so running two concurrently simply means
/// two independent flows.
#[derive(Debug, Clone)]
pub struct LoginFlow {
    config: WebAuthConfig,
}

impl LoginFlow {
    /// Creates a flow driver with the given configuration.
    pub fn new(config: WebAuthConfig) -> Self {
        Self { config }
    }

    /// Returns the flow configuration.
    pub fn config(&self) -> &WebAuthConfig {
        &self.config
    }

    /// Runs the full login flow and synthesizes a session.
    ///
    /// All stage failures surface as one typed [`AuthError`] per attempt,
    /// logged with the stage that failed. The browser is closed whichever
    /// way the flow ends.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        self.config.validate()?;

        info!(stage = %LoginStage::Launching, "Starting login flow");
        let mut session_browser = browser::launch(&self.config).await.map_err(|e| {
            error!(stage = %LoginStage::Launching, error = %e, "Login stage failed");
            e
        })?;

        let result = self.run(&session_browser.page, credentials).await;

        // Guaranteed cleanup: success, selector failure, timeout, or
        // missing-data failure all release the browser.
        session_browser.close().await;

        match &result {
            Ok(session) => {
                info!(stage = %LoginStage::Done, user = %session.user.id, "Login succeeded");
            }
            Err(e) => {
                error!(stage = %LoginStage::Failed, error = %e, "Login failed");
            }
        }
        result
    }

    /// Everything between browser launch and teardown.
    async fn run(&self, page: &Page, credentials: &Credentials) -> Result<Session, AuthError> {
        // The capture buffer is allocated per attempt and the interceptor
        // attached before any navigation, so the first network round trip
        // is already observed.
        let capture = new_shared_capture();
        let interceptor = NetworkInterceptor::attach(page, &self.config, capture.clone()).await?;

        let outcome = self.drive(page, credentials, &capture).await;

        interceptor.detach();
        outcome?;

        let buffer = lock_capture(&capture);
        synthesize_session(&buffer)
    }

    /// Runs the UI stages in order, logging the stage on failure.
    async fn drive(
        &self,
        page: &Page,
        credentials: &Credentials,
        capture: &SharedCapture,
    ) -> Result<(), AuthError> {
        self.staged(LoginStage::Navigating, self.navigate(page)).await?;

        // Best-effort: a missing consent dialog means "already consented"
        // or "not shown", never a failure.
        self.dismiss_consent(page).await;

        self.staged(LoginStage::CredentialEntry, self.enter_credentials(page, credentials))
            .await?;
        self.staged(LoginStage::Submitting, self.submit(page)).await?;
        self.staged(LoginStage::AwaitingCompletion, self.await_completion(page, capture))
            .await?;
        Ok(())
    }

    async fn staged<T>(
        &self,
        stage: LoginStage,
        fut: impl std::future::Future<Output = Result<T, AuthError>>,
    ) -> Result<T, AuthError> {
        debug!(stage = %stage, "Entering login stage");
        fut.await.map_err(|e| {
            error!(stage = %stage, error = %e, "Login stage failed");
            e
        })
    }

    // ========================================================================
    // Stages
    // ========================================================================

    async fn navigate(&self, page: &Page) -> Result<(), AuthError> {
        let navigation = async {
            page.goto(self.config.login_url.as_str()).await?;
            page.wait_for_navigation().await?;
            Ok::<(), AuthError>(())
        };

        tokio::time::timeout(self.config.navigation_timeout, navigation)
            .await
            .map_err(|_| AuthError::NavigationTimeout {
                target: self.config.login_url.clone(),
            })?
    }

    async fn dismiss_consent(&self, page: &Page) {
        debug!(stage = %LoginStage::ConsentHandling, "Looking for consent dialog");
        let resolver = SelectorResolver::uniform(self.config.consent_timeout);
        match resolver.resolve(page, &self.config.consent_selectors).await {
            Ok(resolved) => {
                if let Err(e) = resolved.handle.click().await {
                    warn!(selector = %resolved.selector, error = %e, "Consent click failed");
                } else {
                    debug!(selector = %resolved.selector, "Consent dismissed");
                }
            }
            Err(_) => debug!("No consent dialog found"),
        }
    }

    async fn enter_credentials(
        &self,
        page: &Page,
        credentials: &Credentials,
    ) -> Result<(), AuthError> {
        let resolver = SelectorResolver::new(
            self.config.element_timeout,
            self.config.fallback_timeout,
        );

        let username_chain = vec![self.config.username_selector.clone()];
        let username = resolver.resolve(page, &username_chain).await?;
        username.handle.click().await?;
        username.handle.type_str(&credentials.username).await?;

        let password = resolver
            .resolve(page, &self.config.password_selectors)
            .await?;
        password.handle.click().await?;
        password.handle.type_str(&credentials.password).await?;

        debug!(password_selector = %password.selector, "Credentials entered");
        Ok(())
    }

    async fn submit(&self, page: &Page) -> Result<(), AuthError> {
        let resolver = SelectorResolver::new(
            self.config.element_timeout,
            self.config.fallback_timeout,
        );
        let submit = resolver.resolve(page, &self.config.submit_selectors).await?;
        submit.handle.click().await?;
        debug!(selector = %submit.selector, "Login form submitted");

        // Settle wait is best-effort: single-page deployments submit over
        // XHR and never navigate, and a rejected login stays on the form.
        let _ = tokio::time::timeout(
            self.config.submit_settle_timeout,
            page.wait_for_navigation(),
        )
        .await;

        self.scan_inline_error(page).await
    }

    /// Scans the known inline-error regions and fails on displayed text.
    async fn scan_inline_error(&self, page: &Page) -> Result<(), AuthError> {
        for selector in &self.config.login_error_selectors {
            let Ok(element) = page.find_element(selector.as_str()).await else {
                continue;
            };
            let text = element.inner_text().await.ok().flatten();
            if let Some(message) = displayed_error_text(text) {
                return Err(AuthError::InvalidCredentials { message });
            }
        }
        Ok(())
    }

    async fn await_completion(
        &self,
        page: &Page,
        capture: &SharedCapture,
    ) -> Result<(), AuthError> {
        let pattern = self.config.app_url_regex()?;
        let deadline = Instant::now() + self.config.completion_timeout;

        loop {
            let current = page.url().await?.unwrap_or_default();
            if pattern.is_match(&current) {
                debug!(url = %current, "Authenticated app URL reached");
                break;
            }
            if Instant::now() >= deadline {
                return Err(AuthError::NavigationTimeout {
                    target: self.config.app_url_pattern.clone(),
                });
            }
            tokio::time::sleep(COMPLETION_POLL_INTERVAL).await;
        }

        // Give in-flight API calls a moment to reach the interceptor; the
        // token often arrives a beat after the URL flips.
        if !lock_capture(capture).is_complete() {
            tokio::time::sleep(self.config.completion_grace).await;
        }
        Ok(())
    }
}

/// Returns the trimmed error text when an inline-error region actually
/// displays something.
fn displayed_error_text(text: Option<String>) -> Option<String> {
    let text = text?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================
