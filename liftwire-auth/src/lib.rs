// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # liftwire Auth
//!
//! Browser-driven authentication against the PulseTrack platform.
//!
//! PulseTrack has no public token-issuing endpoint. This crate bridges
//! credentials to a session by driving a real Chromium instance through
//! the platform's HTML login form while passively intercepting the page's
//! own background network traffic, from which it recovers a bearer token
//! and user identifier.
//!
//! ## Pieces
//!
//! - [`flow::LoginFlow`] - the multi-stage flow driver (the entry point)
//! - [`selector::SelectorResolver`] - ordered selector fallback chains
//! - [`capture`] / [`interceptor`] - passive network interception into an
//!   attempt-scoped capture buffer
//! - [`synthesize`] - capture → [`Session`](liftwire_core::Session)
//! - [`authenticator::Authenticator`] - flow + session store lifecycle
//!   (login, refresh, logout)
//!
//! ## Example
//!
//! ```ignore
//! use liftwire_auth::{LoginFlow, WebAuthConfig};
//! use liftwire_core::Credentials;
//!
//! let flow = LoginFlow::new(WebAuthConfig::default());
//! let session = flow
//!     .login(&Credentials::new("athlete@example.com", "secret"))
//!     .await?;
//! println!("logged in as {}", session.user.id);
//! ```

pub mod authenticator;
pub mod browser;
pub mod capture;
pub mod config;
pub mod error;
pub mod flow;
pub mod interceptor;
pub mod selector;
pub mod synthesize;

pub use authenticator::Authenticator;
pub use capture::{new_shared_capture, CaptureBuffer, CaptureRules, SharedCapture};
pub use config::WebAuthConfig;
pub use error::AuthError;
pub use flow::{LoginFlow, LoginStage};
pub use interceptor::NetworkInterceptor;
pub use selector::{ResolvedSelector, SelectorProbe, SelectorResolver};
pub use synthesize::synthesize_session;
