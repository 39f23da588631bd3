//! The HTTP execution engine.
//!
//! One operation per verb. Every call resolves the current session from
//! the configured store, injects the bearer token, executes under the
//! call's timeout, and consults the retry policy on transport failures
//! and retryable statuses. Retry state is local to one call and never
//! leaks across requests.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, AUTHORIZATION, SET_COOKIE};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use liftwire_core::SessionStore;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::outcome::HttpOutcome;
use crate::retry::RetryPolicy;

// ============================================================================
// Request Options
// ============================================================================

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers. A caller-supplied `Authorization` header suppresses
    /// bearer injection.
    pub headers: HeaderMap,
    /// Query parameters appended to the URL.
    pub query: Vec<(String, String)>,
    /// Overrides the engine's default timeout for this call.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets a per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

// ============================================================================
// HTTP Engine
// ============================================================================

/// Executes authenticated requests against the platform APIs.
#[derive(Clone)]
pub struct HttpEngine {
    http: reqwest::Client,
    base_url: Url,
    retry: RetryPolicy,
    session_store: Option<Arc<dyn SessionStore>>,
}

impl HttpEngine {
    /// Builds an engine from configuration.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidRequest`] on a malformed base URL or an HTTP
    /// client that cannot be constructed — programmer-error conditions,
    /// the only ones this layer surfaces as `Err` instead of an outcome.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidRequest(format!("bad base URL {:?}: {e}", config.base_url)))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::InvalidRequest(format!("could not build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            retry: config.retry,
            session_store: None,
        })
    }

    /// Attaches the session store bearer tokens are read from.
    pub fn with_session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session_store = Some(store);
        self
    }

    /// Returns the retry policy in effect.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    // ========================================================================
    // Verbs
    // ========================================================================

    /// Executes a GET request.
    pub async fn get(&self, path: &str, options: RequestOptions) -> HttpOutcome {
        self.execute(Method::GET, path, None, options).await
    }

    /// Executes a POST request with an optional JSON body.
    pub async fn post(&self, path: &str, body: Option<Value>, options: RequestOptions) -> HttpOutcome {
        self.execute(Method::POST, path, body, options).await
    }

    /// Executes a PUT request with an optional JSON body.
    pub async fn put(&self, path: &str, body: Option<Value>, options: RequestOptions) -> HttpOutcome {
        self.execute(Method::PUT, path, body, options).await
    }

    /// Executes a PATCH request with an optional JSON body.
    pub async fn patch(&self, path: &str, body: Option<Value>, options: RequestOptions) -> HttpOutcome {
        self.execute(Method::PATCH, path, body, options).await
    }

    /// Executes a DELETE request.
    pub async fn delete(&self, path: &str, options: RequestOptions) -> HttpOutcome {
        self.execute(Method::DELETE, path, None, options).await
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Executes one call: bearer injection, transport, retry loop.
    #[instrument(skip(self, body, options), fields(method = %method, path = %path))]
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> HttpOutcome {
        let method_name = method.to_string();

        let url = match self.resolve_url(path) {
            Ok(url) => url,
            Err(error) => {
                return HttpOutcome::Failure {
                    method: method_name,
                    url: path.to_string(),
                    status: None,
                    error,
                    cookies: Vec::new(),
                }
            }
        };

        // Token injection happens once per call, before the transport
        // loop; the retry loop below only re-sends.
        let headers = match self.authorized_headers(&options).await {
            Ok(headers) => headers,
            Err(error) => {
                // An unauthenticated call to a protected API would come
                // back 401; the engine answers locally without a round
                // trip when the store holds no session.
                let status = matches!(error, ApiError::NoActiveSession)
                    .then_some(StatusCode::UNAUTHORIZED);
                return HttpOutcome::Failure {
                    method: method_name,
                    url: url.to_string(),
                    status,
                    error,
                    cookies: Vec::new(),
                };
            }
        };

        // Explicit retry state, threaded through the loop: the number of
        // completed attempts decides the next delay.
        let mut attempt: u32 = 0;
        loop {
            let result = self
                .send_once(method.clone(), url.clone(), body.as_ref(), &options, &headers)
                .await;

            match result {
                Ok(response) => {
                    let status = response.status();
                    let cookies = collect_cookies(response.headers());

                    if status.is_success() {
                        let data = read_json_lenient(response).await;
                        debug!(status = %status, "Request succeeded");
                        return HttpOutcome::Success {
                            method: method_name,
                            url: url.to_string(),
                            status,
                            data,
                            cookies,
                        };
                    }

                    if self.retry.should_retry_status(status) && attempt < self.retry.max_retries {
                        let delay = self.retry.next_delay(attempt);
                        warn!(status = %status, attempt, ?delay, "Retrying after status");
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    let error = ApiError::from_status(&method_name, url.as_str(), status);
                    return HttpOutcome::Failure {
                        method: method_name,
                        url: url.to_string(),
                        status: Some(status),
                        error,
                        cookies,
                    };
                }
                Err(e) => {
                    if self.retry.should_retry_transport(&e) && attempt < self.retry.max_retries {
                        let delay = self.retry.next_delay(attempt);
                        warn!(error = %e, attempt, ?delay, "Retrying after transport error");
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    let error = ApiError::from_transport(&method_name, url.as_str(), &e);
                    return HttpOutcome::Failure {
                        method: method_name,
                        url: url.to_string(),
                        status: None,
                        error,
                        cookies: Vec::new(),
                    };
                }
            }
        }
    }

    async fn send_once(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
        options: &RequestOptions,
        headers: &HeaderMap,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let mut request = self.http.request(method, url).headers(headers.clone());
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request.send().await
    }

    /// Builds the effective header map, injecting the stored session's
    /// bearer token unless the caller already set `Authorization`.
    async fn authorized_headers(&self, options: &RequestOptions) -> Result<HeaderMap, ApiError> {
        let mut headers = options.headers.clone();
        if headers.contains_key(AUTHORIZATION) {
            return Ok(headers);
        }

        let Some(store) = &self.session_store else {
            return Ok(headers);
        };

        let session = store.get().await?.ok_or(ApiError::NoActiveSession)?;
        let value = session
            .token
            .authorization_value()
            .parse()
            .map_err(|e| ApiError::InvalidRequest(format!("unencodable bearer token: {e}")))?;
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    fn resolve_url(&self, path: &str) -> Result<Url, ApiError> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Url::parse(path)
                .map_err(|e| ApiError::InvalidRequest(format!("bad URL {path:?}: {e}")));
        }
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidRequest(format!("bad path {path:?}: {e}")))
    }
}

impl std::fmt::Debug for HttpEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpEngine")
            .field("base_url", &self.base_url.as_str())
            .field("retry", &self.retry)
            .field("has_session_store", &self.session_store.is_some())
            .finish()
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Collects `Set-Cookie` values off a response.
fn collect_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(String::from))
        .collect()
}

/// Reads a response body as JSON, degrading to `Null` for empty or
/// non-JSON bodies instead of failing the call.
async fn read_json_lenient(response: reqwest::Response) -> Value {
    match response.text().await {
        Ok(text) if text.trim().is_empty() => Value::Null,
        Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
            debug!(error = %e, "Response body is not JSON");
            Value::Null
        }),
        Err(e) => {
            debug!(error = %e, "Could not read response body");
            Value::Null
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
    fn test_bad_base_url_is_construction_error() {
        let config = ClientConfig::default().with_base_url("not a url");
        assert!(matches!(
            HttpEngine::new(config),
            Err(ApiError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_resolve_relative_and_absolute_urls() {
        let engine = HttpEngine::new(ClientConfig::default()).unwrap();

        let relative = engine.resolve_url("workouts/w1").unwrap();
        assert_eq!(
            relative.as_str(),
            "https://api.pulsetrack.app/api/v1/workouts/w1"
        );

        let absolute = engine
            .resolve_url("https://status.pulsetrack.app/health")
            .unwrap();
        assert_eq!(absolute.host_str(), Some("status.pulsetrack.app"));
    }

    #[test]
    fn test_collect_cookies() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, "sid=1; Path=/".parse().unwrap());
        headers.append(SET_COOKIE, "theme=dark".parse().unwrap());
        assert_eq!(collect_cookies(&headers), ["sid=1; Path=/", "theme=dark"]);
    }
}
