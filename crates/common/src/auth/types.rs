//! Session types and structures
//!
//! Defines the data carried by the cookie-based session: the authenticated
//! user identity, session endpoint configuration, and the error type shared
//! across the refresh pipeline.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Route the client is sent to when the session cannot be recovered
pub const LOGIN_PATH: &str = "/login";

/// Account role on the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    Candidate,
    Employer,
}

/// Authenticated user identity held in the local session store
///
/// The credential itself never appears here; it lives in the transport's
/// cookie jar. This is the display/authorization identity the client keeps
/// while the session is live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: AccountRole,
}

/// Session endpoint configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Backend API base, e.g. `https://api.hireloop.io/v1`
    pub base_url: String,
    /// Refresh endpoint path relative to `base_url`
    pub refresh_path: String,
    /// Timeout for the refresh request
    pub timeout: Duration,
}

impl SessionConfig {
    /// Creates a configuration for the given API base with default paths.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    /// Absolute URL of the refresh endpoint
    #[must_use]
    pub fn refresh_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.refresh_path)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.hireloop.io/v1".to_string(),
            refresh_path: "/auth/refresh".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Error type for session operations
///
/// Cloneable so a single refresh outcome can be delivered to every caller
/// waiting on it.
#[derive(Debug, Clone)]
pub enum SessionError {
    /// Refresh endpoint rejected the credential; the session is not
    /// recoverable
    Refresh { status: u16, body: String },

    /// Refresh request produced no response (connect, DNS, timeout)
    Network(String),

    /// A refresh in flight was abandoned before settling
    Interrupted,

    /// Session store operation failed
    Store(String),

    /// Invalid configuration
    Config(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Refresh { status, body } => {
                write!(f, "Session refresh rejected (HTTP {status}): {body}")
            }
            Self::Network(e) => write!(f, "Session refresh transport error: {e}"),
            Self::Interrupted => write!(f, "Session refresh interrupted before completion"),
            Self::Store(e) => write!(f, "Session store error: {e}"),
            Self::Config(msg) => write!(f, "Session configuration error: {msg}"),
        }
    }
}

impl std::error::Error for SessionError {}
