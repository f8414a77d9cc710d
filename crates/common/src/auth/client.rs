//! Session refresh over HTTP
//!
//! Exchanges the session cookie for a rotated one by POSTing to the backend
//! refresh endpoint. The request carries no body: the credential travels in
//! the cookie jar shared with the API transport, and rotated credential
//! material arrives via `Set-Cookie` and lands in the same jar.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::Client;
use tracing::{debug, warn};

use super::traits::SessionRefresher;
use super::types::{SessionConfig, SessionError};

/// HTTP implementation of [`SessionRefresher`]
///
/// Deliberately separate from the API client so refresh traffic can never
/// re-enter the unauthorized-recovery path.
#[derive(Debug, Clone)]
pub struct RefreshClient {
    client: Client,
    refresh_url: String,
}

impl RefreshClient {
    /// Create a refresh client sharing `jar` with the API transport
    ///
    /// # Errors
    /// Returns `SessionError::Config` if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: &SessionConfig, jar: Arc<Jar>) -> Result<Self, SessionError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .cookie_provider(jar)
            .build()
            .map_err(|e| SessionError::Config(format!("refresh client build failed: {e}")))?;
        Ok(Self { client, refresh_url: config.refresh_url() })
    }
}

#[async_trait]
impl SessionRefresher for RefreshClient {
    async fn refresh_session(&self) -> Result<(), SessionError> {
        debug!(url = %self.refresh_url, "posting session refresh");
        let response = self
            .client
            .post(&self.refresh_url)
            .send()
            .await
            .map_err(|e| SessionError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            debug!("session refresh accepted");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "session refresh rejected");
        Err(SessionError::Refresh { status: status.as_u16(), body })
    }
}
