//! Selector fallback chain resolution.
//!
//! The platform's markup is not contractually stable: data attributes,
//! ids, and semantic HTML selectors each work on some deployments and not
//! others. A chain tries cheap, specific selectors first and falls back to
//! generic ones, without spending the full element timeout on every
//! candidate.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::error::AuthError;

/// How often a pending selector is re-probed.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

// ============================================================================
// Selector Probe
// ============================================================================

/// One polymorphic "try resolve" operation against a page.
///
/// A probe answers whether a selector currently resolves, returning a
/// handle to the matched element when it does. The production impl is a
/// CDP page; tests use an in-memory probe.
#[async_trait]
pub trait SelectorProbe: Send + Sync {
    /// Handle to a resolved element.
    type Handle: Send;

    /// Attempts to resolve `selector` once, without waiting.
    async fn try_resolve(&self, selector: &str) -> Option<Self::Handle>;
}

#[async_trait]
impl SelectorProbe for chromiumoxide::Page {
    type Handle = chromiumoxide::Element;

    async fn try_resolve(&self, selector: &str) -> Option<Self::Handle> {
        self.find_element(selector).await.ok()
    }
}

// ============================================================================
// Resolved Selector
// ============================================================================

/// A selector candidate that resolved, with its element handle.
#[derive(Debug)]
pub struct ResolvedSelector<H> {
    /// The selector that matched.
    pub selector: String,
    /// Position of the winning candidate in the chain.
    pub index: usize,
    /// Handle to the matched element.
    pub handle: H,
}

// ============================================================================
// Selector Resolver
// ============================================================================

/// Resolves an ordered chain of selector candidates.
///
/// Candidates are tried strictly in order. The first candidate gets the
/// full `first_timeout` (it is the selector expected to work); later
/// fallbacks each get the shorter `fallback_timeout`. The first candidate
/// that resolves wins and no further candidates are attempted. If the
/// chain is exhausted the error names every attempted selector, in order.
#[derive(Debug, Clone)]
pub struct SelectorResolver {
    first_timeout: Duration,
    fallback_timeout: Duration,
}

impl SelectorResolver {
    /// Creates a resolver with the given per-candidate timeouts.
    pub fn new(first_timeout: Duration, fallback_timeout: Duration) -> Self {
        Self {
            first_timeout,
            fallback_timeout,
        }
    }

    /// Creates a resolver that gives every candidate the same timeout.
    pub fn uniform(timeout: Duration) -> Self {
        Self::new(timeout, timeout)
    }

    /// Resolves the first matching candidate from `candidates`.
    ///
    /// # Errors
    ///
    /// [`AuthError::ElementNotFound`] when every candidate's timeout
    /// elapses without a match.
    pub async fn resolve<P: SelectorProbe>(
        &self,
        probe: &P,
        candidates: &[String],
    ) -> Result<ResolvedSelector<P::Handle>, AuthError> {
        for (index, selector) in candidates.iter().enumerate() {
            let timeout = if index == 0 {
                self.first_timeout
            } else {
                self.fallback_timeout
            };

            trace!(selector = %selector, index, ?timeout, "Trying selector candidate");

            if let Some(handle) = self.wait_for(probe, selector, timeout).await {
                debug!(selector = %selector, index, "Selector resolved");
                return Ok(ResolvedSelector {
                    selector: selector.clone(),
                    index,
                    handle,
                });
            }

            trace!(selector = %selector, index, "Selector candidate timed out");
        }

        Err(AuthError::ElementNotFound {
            attempted: candidates.to_vec(),
        })
    }

    /// Polls one candidate until it resolves or `timeout` elapses.
    async fn wait_for<P: SelectorProbe>(
        &self,
        probe: &P,
        selector: &str,
        timeout: Duration,
    ) -> Option<P::Handle> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(handle) = probe.try_resolve(selector).await {
                return Some(handle);
            }
            if Instant::now() >= deadline {
                return None;
            }
            tokio::time::sleep(POLL_INTERVAL.min(timeout)).await;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Probe that resolves a fixed set of selectors and records every
    /// attempt it receives.
    struct MockProbe {
        resolvable: HashSet<String>,
        attempts: Mutex<Vec<String>>,
    }

    impl MockProbe {
        fn resolving(selectors: &[&str]) -> Self {
            Self {
                resolvable: selectors.iter().map(|s| (*s).to_string()).collect(),
                attempts: Mutex::new(Vec::new()),
            }
        }

        fn attempts(&self) -> Vec<String> {
            self.attempts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SelectorProbe for MockProbe {
        type Handle = String;

        async fn try_resolve(&self, selector: &str) -> Option<String> {
            self.attempts.lock().unwrap().push(selector.to_string());
            self.resolvable
                .contains(selector)
                .then(|| format!("handle:{selector}"))
        }
    }

    fn chain(selectors: &[&str]) -> Vec<String> {
        selectors.iter().map(|s| (*s).to_string()).collect()
    }

    fn fast_resolver() -> SelectorResolver {
        SelectorResolver::uniform(Duration::from_millis(10))
    }

    #[tokio::test]
    async fn test_first_match_short_circuits() {
        let probe = MockProbe::resolving(&["#Username"]);
        let resolved = fast_resolver()
            .resolve(&probe, &chain(&["#Username", "input[name=username]"]))
            .await
            .unwrap();

        assert_eq!(resolved.selector, "#Username");
        assert_eq!(resolved.index, 0);
        // The second candidate was never attempted.
        assert_eq!(probe.attempts(), vec!["#Username"]);
    }

    #[tokio::test]
    async fn test_password_chain_falls_through_to_third() {
        // Only the generic selector resolves; the two specific ones are
        // exhausted first and nothing is tried after the match.
        let probe = MockProbe::resolving(&["input[type=password]"]);
        let candidates = chain(&["[data-cy=password]", "#Password", "input[type=password]"]);

        let resolved = fast_resolver().resolve(&probe, &candidates).await.unwrap();

        assert_eq!(resolved.selector, "input[type=password]");
        assert_eq!(resolved.index, 2);
        let attempts = probe.attempts();
        assert_eq!(attempts.last().unwrap(), "input[type=password]");
        assert!(attempts.contains(&"[data-cy=password]".to_string()));
        assert!(attempts.contains(&"#Password".to_string()));
    }

    #[tokio::test]
    async fn test_exhaustion_lists_all_selectors_in_order() {
        let probe = MockProbe::resolving(&[]);
        let candidates = chain(&["[data-cy=password]", "#Password", "input[type=password]"]);

        let err = fast_resolver()
            .resolve(&probe, &candidates)
            .await
            .unwrap_err();

        match err {
            AuthError::ElementNotFound { attempted } => {
                assert_eq!(attempted, candidates);
            }
            other => panic!("expected ElementNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_chain_fails() {
        let probe = MockProbe::resolving(&["anything"]);
        let err = fast_resolver().resolve(&probe, &[]).await.unwrap_err();
        assert!(matches!(
            err,
            AuthError::ElementNotFound { attempted } if attempted.is_empty()
        ));
    }
}
