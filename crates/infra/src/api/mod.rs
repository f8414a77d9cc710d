//! HireLoop platform API client
//!
//! This module provides the HTTP-based client for the HireLoop backend:
//! typed operations for jobs, applications, blog content, profiles, and
//! assisted content generation, with transparent recovery from expired
//! sessions.
//!
//! # Architecture
//!
//! - Transport via [`crate::http::HttpClient`] (no direct reqwest in
//!   operations)
//! - Cookie credential lives in a jar shared with the refresh client;
//!   no token plumbing in request paths
//! - Unauthorized responses trigger one coalesced refresh behind the
//!   [`SessionRecovery`] seam, then one replay of the original request
//! - Typed command wrappers with no business rules; validation stays on
//!   the backend

pub mod auth;
pub mod client;
pub mod commands;
pub mod errors;

pub use auth::{SessionAuthService, SessionRecovery};
pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig};
pub use commands::{ApiCommands, LoginRequest};
pub use errors::{ApiError, ApiErrorCategory};
