//! In-process session store
//!
//! Default [`SessionStore`] backing: the signed-in identity lives in memory
//! for the lifetime of the client. Applications with their own persistence
//! implement the trait instead.

use async_trait::async_trait;
use parking_lot::RwLock;

use super::traits::SessionStore;
use super::types::{SessionError, SessionUser};

/// Memory-backed session store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    user: RwLock<Option<SessionUser>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn store_user(&self, user: &SessionUser) -> Result<(), SessionError> {
        *self.user.write() = Some(user.clone());
        Ok(())
    }

    async fn current_user(&self) -> Option<SessionUser> {
        self.user.read().clone()
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.user.write() = None;
        Ok(())
    }

    async fn is_active(&self) -> bool {
        self.user.read().is_some()
    }
}
