//! Typed API surface over the execution engine.
//!
//! Thin, mechanical wrappers: each endpoint module owns its path
//! constants and wire-shape structs and converts them into core models.

mod profile;
mod workouts;

use crate::engine::HttpEngine;

/// High-level client for the platform's private JSON APIs.
///
/// Every method goes through the engine, so bearer injection, retries,
/// and error classification apply uniformly.
#[derive(Debug, Clone)]
pub struct ApiClient {
    engine: HttpEngine,
}

impl ApiClient {
    /// Wraps an execution engine.
    pub fn new(engine: HttpEngine) -> Self {
        Self { engine }
    }

    /// Returns the underlying engine, for raw calls.
    pub fn engine(&self) -> &HttpEngine {
        &self.engine
    }
}
