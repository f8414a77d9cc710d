//! API-specific error types
//!
//! One taxonomy for everything the client can hand back: transport failures
//! that produced no response, non-success statuses passed through, session
//! recovery failures, and decode/configuration problems.

use std::time::Duration;

use hireloop_common::auth::SessionError;
use thiserror::Error;

/// Broad classes of API failure, for callers that branch on kind rather
/// than on individual variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// No response was obtained (connect, DNS, TLS, timeout)
    Transport,
    /// The backend answered with a non-success status
    Http,
    /// The session could not be recovered after an unauthorized response
    Session,
    /// The response body did not match the expected shape
    Decode,
    /// The client was misconfigured or the request was malformed
    Config,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Session recovery failed: {0}")]
    Session(#[from] SessionError),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Transport,
            Self::Http { .. } => ApiErrorCategory::Http,
            Self::Session(_) => ApiErrorCategory::Session,
            Self::Decode(_) => ApiErrorCategory::Decode,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// Status code of the failing response, when one was received
    ///
    /// For session failures this is the status the refresh endpoint
    /// answered with.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Session(SessionError::Refresh { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// Check if the backend rejected the request as unauthenticated
    ///
    /// True only for a 401 that survived recovery (the replay was refused
    /// again); a recoverable 401 never reaches the caller.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }

    /// Check if the session is gone and the user was sent to login
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::Session(_))
    }

    /// Check if retrying the same call later could succeed
    ///
    /// Session and decode failures are terminal; transport failures and
    /// server-side statuses are worth another attempt.
    pub fn should_retry(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) => true,
            Self::Http { status, .. } => *status >= 500 || *status == 429,
            Self::Session(_) | Self::Decode(_) | Self::Config(_) => false,
        }
    }
}
