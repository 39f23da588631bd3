//! Trait definitions for liftwire.
//!
//! This module defines the narrow interfaces the auth flow and the HTTP
//! layer depend on, so callers can plug in their own implementations.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::Session;

/// Storage for the current authenticated session.
///
/// The login flow writes a session here on success; the HTTP execution
/// engine reads it before every authenticated call. Implementations decide
/// the persistence mechanism (memory, file, keychain). A store holds at
/// most one session: `set` supersedes the previous one wholesale and
/// `clear` removes it.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the current session, if one is stored.
    async fn get(&self) -> Result<Option<Session>, CoreError>;

    /// Replaces the stored session.
    async fn set(&self, session: Session) -> Result<(), CoreError>;

    /// Removes the stored session.
    async fn clear(&self) -> Result<(), CoreError>;
}
