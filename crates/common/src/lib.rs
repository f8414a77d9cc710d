//! Session infrastructure shared across HireLoop client crates.
//!
//! # Safety and Quality
//!
//! This crate enforces strict safety and quality standards to ensure
//! reliability across all HireLoop components.
//!
//! The one concern here is the cookie session: the [`auth`] module holds the
//! single-flight refresh coordination, the recovery protocol, and the
//! collaborator seams the API client plugs into. The [`testing`] module
//! carries mock collaborators for this crate's tests and for downstream
//! integration tests.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;

// Testing utilities
// ---------------------------------------------------------------
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
pub use auth::{
    AccountRole, LoginRedirect, MemorySessionStore, NoopRedirect, RefreshClient, SessionConfig,
    SessionError, SessionManager, SessionRefresher, SessionStore, SessionUser,
};
