// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # liftwire Core
//!
//! Core types, models, and traits for the liftwire client.
//!
//! This crate provides the foundational abstractions used across all other
//! liftwire crates, including:
//!
//! - Domain models (tokens, sessions, users, workouts)
//! - Error types
//! - The [`SessionStore`] trait that the auth flow and HTTP layer share
//!
//! ## Key Types
//!
//! ### Auth Types
//! - [`Credentials`] - Transient login credentials (never persisted)
//! - [`AuthToken`] - Bearer token recovered from intercepted traffic
//! - [`Session`] - Authenticated identity + token handed to the HTTP layer
//!
//! ### Domain Types
//! - [`User`] - Platform user profile
//! - [`Workout`] - A recorded workout
//! - [`WorkoutDraft`] - Payload for creating or updating a workout

pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Auth types
    AuthToken,
    Credentials,
    Session,
    // Domain types
    ActivityKind,
    User,
    Workout,
    WorkoutDraft,
};

// Re-export traits
pub use traits::SessionStore;
