//! Session lifecycle and unauthorized-recovery protocol
//!
//! [`SessionManager`] owns the client-side session: the signed-in identity,
//! the single-flight refresh gate, and the forced-teardown path (clear local
//! state, send the UI to the login route) taken when the backend will no
//! longer accept the session credential.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::coordinator::{RefreshCoordinator, RefreshGuard, RefreshTicket};
use super::traits::{LoginRedirect, SessionRefresher, SessionStore};
use super::types::{SessionError, SessionUser};

/// Client session orchestrator
///
/// Concurrent recovery attempts coalesce onto one refresh: the first caller
/// performs it, the rest await the broadcast outcome. A failed refresh is
/// terminal for the session; local state is cleared and the user is sent to
/// the login route exactly once.
pub struct SessionManager<R, S, N>
where
    R: SessionRefresher + 'static,
    S: SessionStore + 'static,
    N: LoginRedirect + 'static,
{
    refresher: Arc<R>,
    store: Arc<S>,
    redirect: Arc<N>,
    coordinator: RefreshCoordinator,
    torn_down: AtomicBool,
}

impl<R, S, N> SessionManager<R, S, N>
where
    R: SessionRefresher + 'static,
    S: SessionStore + 'static,
    N: LoginRedirect + 'static,
{
    /// Create a new session manager
    ///
    /// # Arguments
    /// * `refresher` - Refresh endpoint client (shares the transport's
    ///   cookie jar)
    /// * `store` - Local session state
    /// * `redirect` - Navigation side effect for forced logout
    pub fn new(refresher: Arc<R>, store: Arc<S>, redirect: Arc<N>) -> Self {
        Self {
            refresher,
            store,
            redirect,
            coordinator: RefreshCoordinator::new(),
            torn_down: AtomicBool::new(false),
        }
    }

    /// Recover from an unauthorized response.
    ///
    /// Exactly one caller performs the refresh no matter how many arrive
    /// concurrently; the rest are settled with the same outcome in arrival
    /// order.
    ///
    /// `Ok(())` means the credential was rotated and the caller should
    /// replay its original request. `Err` means the session is gone: local
    /// state has been cleared, the login redirect has fired, and the error
    /// should be surfaced instead of the original response.
    ///
    /// # Errors
    /// Returns the refresh failure shared by every coalesced caller.
    pub async fn recover_unauthorized(&self) -> Result<(), SessionError> {
        match self.coordinator.begin_or_enqueue() {
            RefreshTicket::Leader(guard) => self.lead_refresh(guard).await,
            RefreshTicket::Waiter(rx) => {
                debug!("refresh already in flight; awaiting outcome");
                match rx.await {
                    Ok(outcome) => outcome,
                    // Sender dropped without a send: coordinator torn down
                    Err(_) => Err(SessionError::Interrupted),
                }
            }
        }
    }

    /// Performs the single refresh on behalf of every coalesced caller.
    async fn lead_refresh(&self, guard: RefreshGuard<'_>) -> Result<(), SessionError> {
        debug!("session refresh started");
        let outcome = self.refresher.refresh_session().await;

        // Waiters are settled before teardown so none of them observes a
        // half-cleared session while still queued.
        guard.settle(&outcome);

        match &outcome {
            Ok(()) => info!("session refresh succeeded"),
            Err(e) => {
                warn!(error = %e, "session refresh failed; terminating session");
                self.terminate_session().await;
            }
        }
        outcome
    }

    /// Clears local state and fires the login redirect.
    ///
    /// Idempotent: repeat calls do nothing until a new session is
    /// established. A store failure is logged and does not stop the
    /// redirect.
    pub async fn terminate_session(&self) {
        if self.torn_down.swap(true, Ordering::SeqCst) {
            debug!("session already torn down");
            return;
        }
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "session store clear failed during teardown");
        }
        self.redirect.redirect_to_login();
        info!("session terminated; user sent to login");
    }

    /// Records a signed-in user and re-arms teardown for the new session.
    ///
    /// # Errors
    /// Returns `SessionError::Store` if the identity cannot be recorded.
    pub async fn establish_session(&self, user: SessionUser) -> Result<(), SessionError> {
        self.store.store_user(&user).await?;
        self.torn_down.store(false, Ordering::SeqCst);
        info!(user_id = %user.id, "session established");
        Ok(())
    }

    /// Voluntary sign-out: clears local state without a redirect.
    ///
    /// # Errors
    /// Returns `SessionError::Store` if the store rejects the clear.
    pub async fn clear_session(&self) -> Result<(), SessionError> {
        self.store.clear().await?;
        self.torn_down.store(false, Ordering::SeqCst);
        info!("session cleared");
        Ok(())
    }

    /// Currently signed-in user, if any
    pub async fn current_user(&self) -> Option<SessionUser> {
        self.store.current_user().await
    }

    /// Whether a user is currently signed in
    pub async fn is_authenticated(&self) -> bool {
        self.store.is_active().await
    }
}

impl<R, S, N> std::fmt::Debug for SessionManager<R, S, N>
where
    R: SessionRefresher + 'static,
    S: SessionStore + 'static,
    N: LoginRedirect + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("refreshing", &self.coordinator.is_refreshing())
            .field("torn_down", &self.torn_down.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
