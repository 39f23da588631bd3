//! HTTP execution engine integration tests against a local mock server.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Duration as ChronoDuration;
use liftwire_client::{ApiError, ClientConfig, HttpEngine, RequestOptions, RetryPolicy};
use liftwire_core::{AuthToken, Session, User};
use liftwire_store::MemorySessionStore;
use reqwest::header::AUTHORIZATION;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_session(token: &str) -> Session {
    Session::new(
        AuthToken::bearer(token, ChronoDuration::hours(6)),
        User::minimal("123"),
    )
}

fn engine_for(server: &MockServer, retry: RetryPolicy) -> HttpEngine {
    let config = ClientConfig::default()
        .with_base_url(format!("{}/api/v1/", server.uri()))
        .with_retry(retry);
    HttpEngine::new(config).unwrap()
}

#[tokio::test]
async fn no_session_in_store_fails_locally_with_401() {
    // Scenario: protected call with an empty session store. The engine
    // answers without any network round trip.
    let store = Arc::new(MemorySessionStore::new());
    let engine = HttpEngine::new(ClientConfig::default())
        .unwrap()
        .with_session_store(store);

    let outcome = engine.get("workouts", RequestOptions::new()).await;

    assert!(!outcome.is_success());
    assert_eq!(outcome.status(), Some(reqwest::StatusCode::UNAUTHORIZED));
    assert!(matches!(
        outcome.error(),
        Some(ApiError::NoActiveSession)
    ));
}

#[tokio::test]
async fn three_503s_then_200_succeeds_within_retry_budget() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/workouts"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(3)
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/workouts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"workouts": []})))
        .expect(1)
        .mount(&server)
        .await;

    let retry = RetryPolicy::new(3)
        .with_base_delay(Duration::from_millis(50))
        .with_backoff_factor(2.0)
        .with_jitter(false);
    let engine = engine_for(&server, retry.clone());

    let started = Instant::now();
    let outcome = engine.get("workouts", RequestOptions::new()).await;
    let elapsed = started.elapsed();

    assert!(outcome.is_success(), "expected success, got {outcome:?}");
    assert_eq!(outcome.data().unwrap(), &json!({"workouts": []}));

    // The engine slept through at least the first two computed delays
    // (50ms + 100ms) before the third retry succeeded.
    let floor = retry.delay_for_attempt(0) + retry.delay_for_attempt(1);
    assert!(
        elapsed >= floor,
        "elapsed {elapsed:?} below backoff floor {floor:?}"
    );
}

#[tokio::test]
async fn bearer_token_injected_from_session_store() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/current"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": {"userId": 123}})))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::with_session(sample_session("abc")));
    let engine = engine_for(&server, RetryPolicy::no_retry()).with_session_store(store);

    let outcome = engine.get("users/current", RequestOptions::new()).await;
    assert!(outcome.is_success());
}

#[tokio::test]
async fn caller_authorization_header_wins_over_store() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/ping"))
        .and(header("authorization", "Bearer caller-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::with_session(sample_session("stored")));
    let engine = engine_for(&server, RetryPolicy::no_retry()).with_session_store(store);

    let mut options = RequestOptions::new();
    options
        .headers
        .insert(AUTHORIZATION, "Bearer caller-token".parse().unwrap());

    let outcome = engine.get("ping", options).await;
    assert!(outcome.is_success());
}

#[tokio::test]
async fn non_retryable_4xx_is_not_retried() {
    let server = MockServer::start().await;

    // expect(1) makes the server itself assert a second request never
    // arrived.
    Mock::given(method("GET"))
        .and(path("/api/v1/workouts/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let retry = RetryPolicy::new(3)
        .with_base_delay(Duration::from_millis(10))
        .with_jitter(false);
    let engine = engine_for(&server, retry);

    let outcome = engine.get("workouts/missing", RequestOptions::new()).await;

    assert!(!outcome.is_success());
    match outcome.error() {
        Some(ApiError::Http { status, method, .. }) => {
            assert_eq!(*status, 404);
            assert_eq!(method, "GET");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn set_cookie_headers_are_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/ping"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("set-cookie", "pt_session=s1; Path=/"),
        )
        .mount(&server)
        .await;

    let engine = engine_for(&server, RetryPolicy::no_retry());
    let outcome = engine.get("ping", RequestOptions::new()).await;

    assert!(outcome.is_success());
    assert!(outcome
        .cookies()
        .iter()
        .any(|c| c.starts_with("pt_session=s1")));
}

#[tokio::test]
async fn empty_body_reads_as_null_data() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/workouts/w1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let engine = engine_for(&server, RetryPolicy::no_retry());
    let outcome = engine.delete("workouts/w1", RequestOptions::new()).await;

    assert!(outcome.is_success());
    assert_eq!(outcome.data().unwrap(), &serde_json::Value::Null);
}
