//! Traits for session collaborators
//!
//! These traits enable dependency injection and testing by abstracting the
//! session's external touch points (refresh endpoint, local state, UI
//! navigation).

use async_trait::async_trait;

use super::types::{SessionError, SessionUser};

/// Trait for the credential refresh operation
///
/// Implementations call the backend refresh endpoint. The ambient credential
/// (session cookie) travels with the request; rotated credential material is
/// applied by the transport on success, so a successful call returns nothing.
#[async_trait]
pub trait SessionRefresher: Send + Sync {
    /// Exchange the current session credential for a fresh one
    ///
    /// # Errors
    /// Returns `SessionError::Refresh` when the backend rejects the
    /// credential and `SessionError::Network` when no response arrives.
    async fn refresh_session(&self) -> Result<(), SessionError>;
}

/// Trait for local session state (who is signed in on this client)
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Record the signed-in user
    async fn store_user(&self, user: &SessionUser) -> Result<(), SessionError>;

    /// Currently signed-in user, if any
    async fn current_user(&self) -> Option<SessionUser>;

    /// Remove any stored identity. Must be idempotent: clearing an empty
    /// store succeeds.
    async fn clear(&self) -> Result<(), SessionError>;

    /// Whether a user is currently recorded
    async fn is_active(&self) -> bool;
}

/// Trait for the forced-logout navigation side effect
///
/// Fired when the session cannot be recovered. Synchronous: implementations
/// hand off to their UI layer and return.
pub trait LoginRedirect: Send + Sync {
    /// Send the user interface to the login route
    fn redirect_to_login(&self);
}

/// Redirect for contexts without a user interface (tests, background jobs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRedirect;

impl LoginRedirect for NoopRedirect {
    fn redirect_to_login(&self) {}
}
