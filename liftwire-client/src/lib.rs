// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # liftwire Client
//!
//! The resilient HTTP layer for the PulseTrack APIs.
//!
//! Every call made through the [`HttpEngine`]:
//!
//! 1. Resolves the current session from the configured
//!    [`SessionStore`](liftwire_core::SessionStore) and injects
//!    `Authorization: Bearer <token>` unless the caller set one.
//! 2. Executes under the call's timeout.
//! 3. Retries transport failures and retryable statuses with exponential
//!    backoff, a delay ceiling, and optional jitter ([`RetryPolicy`]).
//! 4. Returns a uniform [`HttpOutcome`] — ordinary HTTP failures are
//!    values, not panics.
//!
//! The [`ApiClient`] layers typed workout/profile endpoints on top.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use liftwire_client::{ApiClient, ClientConfig, HttpEngine};
//! use liftwire_store::MemorySessionStore;
//!
//! let store = Arc::new(MemorySessionStore::with_session(session));
//! let engine = HttpEngine::new(ClientConfig::default())?.with_session_store(store);
//! let api = ApiClient::new(engine);
//! let workouts = api.list_workouts().await?;
//! ```

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod outcome;
pub mod retry;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use engine::{HttpEngine, RequestOptions};
pub use error::ApiError;
pub use outcome::HttpOutcome;
pub use retry::RetryPolicy;
