//! Session recovery seam for the API client
//!
//! The client never talks to the session subsystem directly; it goes through
//! [`SessionRecovery`] so tests can inject mock recovery and applications can
//! swap session strategies without touching request plumbing.

use std::sync::Arc;

use async_trait::async_trait;
use hireloop_common::auth::{LoginRedirect, SessionManager, SessionRefresher, SessionStore};
use tracing::debug;

use super::errors::ApiError;

/// Trait for recovering from an unauthorized API response
///
/// This trait allows dependency injection and testing with mock recovery.
#[async_trait]
pub trait SessionRecovery: Send + Sync {
    /// Attempt to restore the session credential after a 401
    ///
    /// `Ok(())` means the credential was rotated and the caller should
    /// replay its original request. Concurrent callers coalesce: however
    /// many arrive while a recovery is in flight, at most one refresh runs.
    ///
    /// # Errors
    /// Returns the shared refresh failure when the session cannot be
    /// recovered; by then local session state is cleared and the login
    /// redirect has fired.
    async fn recover_unauthorized(&self) -> Result<(), ApiError>;
}

/// Bridges the API client to the session subsystem
///
/// Thin adapter over [`SessionManager`]: erases the manager's collaborator
/// generics behind `Arc<dyn SessionRecovery>` so the client stays
/// monomorphic.
pub struct SessionAuthService<R, S, N>
where
    R: SessionRefresher + 'static,
    S: SessionStore + 'static,
    N: LoginRedirect + 'static,
{
    manager: Arc<SessionManager<R, S, N>>,
}

impl<R, S, N> SessionAuthService<R, S, N>
where
    R: SessionRefresher + 'static,
    S: SessionStore + 'static,
    N: LoginRedirect + 'static,
{
    /// Create a recovery service backed by `manager`
    pub fn new(manager: Arc<SessionManager<R, S, N>>) -> Self {
        Self { manager }
    }

    /// The underlying session manager
    pub fn manager(&self) -> &Arc<SessionManager<R, S, N>> {
        &self.manager
    }
}

#[async_trait]
impl<R, S, N> SessionRecovery for SessionAuthService<R, S, N>
where
    R: SessionRefresher + 'static,
    S: SessionStore + 'static,
    N: LoginRedirect + 'static,
{
    async fn recover_unauthorized(&self) -> Result<(), ApiError> {
        debug!("delegating unauthorized response to session manager");
        self.manager.recover_unauthorized().await?;
        Ok(())
    }
}
