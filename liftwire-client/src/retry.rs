//! Retry policy for HTTP requests.
//!
//! Exponential backoff with a delay ceiling and optional jitter:
//! `delay(attempt) = min(base * factor^attempt, max)`, with jitter applied
//! multiplicatively before the ceiling clamp so a jittered delay never
//! exceeds the ceiling either.

use std::time::Duration;

use rand::Rng;

/// Statuses retried even though they are not 5xx.
const DEFAULT_STATUS_EXCEPTIONS: &[u16] = &[408, 429];

/// Strategy for retrying failed requests.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,
    /// Base delay before the first retry.
    pub base_delay: Duration,
    /// Exponential backoff multiplier.
    pub backoff_factor: f64,
    /// Ceiling the computed delay is clamped to.
    pub max_delay: Duration,
    /// Randomize delays to avoid thundering-herd retries.
    pub jitter: bool,
    /// Non-5xx statuses that are still retried.
    pub status_exceptions: Vec<u16>,
}

impl RetryPolicy {
    /// Creates a policy with the given retry budget.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::from_millis(500),
            backoff_factor: 2.0,
            max_delay: Duration::from_secs(30),
            jitter: true,
            status_exceptions: DEFAULT_STATUS_EXCEPTIONS.to_vec(),
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            backoff_factor: 1.0,
            max_delay: Duration::ZERO,
            jitter: false,
            status_exceptions: Vec::new(),
        }
    }

    /// Sets the base delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Sets the backoff multiplier.
    pub fn with_backoff_factor(mut self, factor: f64) -> Self {
        self.backoff_factor = factor;
        self
    }

    /// Sets the delay ceiling.
    pub fn with_max_delay(mut self, max: Duration) -> Self {
        self.max_delay = max;
        self
    }

    /// Enables or disables jitter.
    pub fn with_jitter(mut self, enabled: bool) -> Self {
        self.jitter = enabled;
        self
    }

    /// Computed (un-jittered) delay after `attempt` completed attempts.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = self.backoff_factor.powi(i32::try_from(attempt).unwrap_or(i32::MAX));
        let raw = self.base_delay.as_secs_f64() * factor;
        let clamped = raw.min(self.max_delay.as_secs_f64());
        Duration::from_secs_f64(clamped.max(0.0))
    }

    /// Delay actually slept after `attempt` completed attempts, with
    /// jitter applied before the ceiling clamp when enabled.
    pub fn next_delay(&self, attempt: u32) -> Duration {
        if !self.jitter {
            return self.delay_for_attempt(attempt);
        }

        let factor = self.backoff_factor.powi(i32::try_from(attempt).unwrap_or(i32::MAX));
        let raw = self.base_delay.as_secs_f64() * factor;
        let jittered = raw * rand::thread_rng().gen_range(0.5..1.5);
        let clamped = jittered.min(self.max_delay.as_secs_f64());
        Duration::from_secs_f64(clamped.max(0.0))
    }

    /// Whether a transport error is worth retrying.
    pub fn should_retry_transport(&self, error: &reqwest::Error) -> bool {
        error.is_connect() || error.is_timeout()
    }

    /// Whether a response status is worth retrying.
    pub fn should_retry_status(&self, status: reqwest::StatusCode) -> bool {
        status.is_server_error() || self.status_exceptions.contains(&status.as_u16())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

// ============================================================================
// Tests
// ============================================================================
