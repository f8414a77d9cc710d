//! Mock implementations of session collaborator traits
//!
//! Provides mock objects for testing purposes.

// Allow missing error/panic docs for test mocks - they are designed to be
// simple and errors are clearly indicated by their return types
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Semaphore;

use crate::auth::{LoginRedirect, SessionError, SessionRefresher, SessionStore, SessionUser};

/// Mock refresher with a configurable outcome and call counting
///
/// An optional semaphore gate lets concurrency tests hold the refresh open
/// until every competing caller has queued up, then release it.
#[derive(Debug)]
pub struct MockSessionRefresher {
    calls: AtomicUsize,
    outcome: Mutex<Result<(), SessionError>>,
    gate: Option<Arc<Semaphore>>,
}

impl MockSessionRefresher {
    /// Refresher that always succeeds
    #[must_use]
    pub fn succeeding() -> Self {
        Self { calls: AtomicUsize::new(0), outcome: Mutex::new(Ok(())), gate: None }
    }

    /// Refresher that always fails with `err`
    #[must_use]
    pub fn failing(err: SessionError) -> Self {
        Self { calls: AtomicUsize::new(0), outcome: Mutex::new(Err(err)), gate: None }
    }

    /// Refresher that blocks on `gate` before returning its outcome
    /// (success unless overridden with [`Self::set_outcome`])
    #[must_use]
    pub fn gated(gate: Arc<Semaphore>) -> Self {
        Self { calls: AtomicUsize::new(0), outcome: Mutex::new(Ok(())), gate: Some(gate) }
    }

    /// Replaces the outcome returned by subsequent refresh calls.
    pub fn set_outcome(&self, outcome: Result<(), SessionError>) {
        *self.outcome.lock() = outcome;
    }

    /// Number of refresh calls observed
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionRefresher for MockSessionRefresher {
    async fn refresh_session(&self) -> Result<(), SessionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            let _permit =
                gate.acquire().await.map_err(|_| SessionError::Network("gate closed".into()))?;
        }
        self.outcome.lock().clone()
    }
}

/// In-memory session store with failure injection and clear counting
#[derive(Debug, Default)]
pub struct MockSessionStore {
    user: Mutex<Option<SessionUser>>,
    clear_calls: AtomicUsize,
    fail_clear: AtomicBool,
}

impl MockSessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent `clear` calls fail when `fail` is true.
    pub fn set_fail_clear(&self, fail: bool) {
        self.fail_clear.store(fail, Ordering::SeqCst);
    }

    /// Number of `clear` calls observed
    pub fn clear_calls(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn store_user(&self, user: &SessionUser) -> Result<(), SessionError> {
        *self.user.lock() = Some(user.clone());
        Ok(())
    }

    async fn current_user(&self) -> Option<SessionUser> {
        self.user.lock().clone()
    }

    async fn clear(&self) -> Result<(), SessionError> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(SessionError::Store("simulated clear failure".to_string()));
        }
        *self.user.lock() = None;
        Ok(())
    }

    async fn is_active(&self) -> bool {
        self.user.lock().is_some()
    }
}

/// Redirect that records how many times it fired
#[derive(Debug, Default)]
pub struct RecordingRedirect {
    count: AtomicUsize,
}

impl RecordingRedirect {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of redirects observed
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl LoginRedirect for RecordingRedirect {
    fn redirect_to_login(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}
