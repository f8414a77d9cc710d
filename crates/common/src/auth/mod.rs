//! Cookie-session infrastructure
//!
//! This module provides the client-side session machinery for the HireLoop
//! backend: a single-flight refresh gate, the recovery protocol run when the
//! API answers 401, and the forced-teardown path taken when the session
//! cannot be recovered.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  SessionManager  │  Recovery protocol + teardown
//! └────────┬─────────┘
//!          │
//!          ├──► RefreshCoordinator   (single-flight gate + waiter queue)
//!          ├──► SessionRefresher     (RefreshClient → POST /auth/refresh)
//!          ├──► SessionStore         (MemorySessionStore / app-provided)
//!          └──► LoginRedirect        (app shell / NoopRedirect)
//! ```
//!
//! The credential itself is a cookie held by a `reqwest` cookie jar shared
//! between the API transport and the refresh client, so a successful refresh
//! rotates the credential for both sides without any token plumbing.
//!
//! # Usage Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use hireloop_common::auth::{
//!     MemorySessionStore, NoopRedirect, RefreshClient, SessionConfig, SessionManager,
//! };
//! use reqwest::cookie::Jar;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // One jar for the whole client; the API transport uses it too
//!     let jar = Arc::new(Jar::default());
//!
//!     let config = SessionConfig::new("https://api.hireloop.io/v1");
//!     let refresher = Arc::new(RefreshClient::new(&config, Arc::clone(&jar))?);
//!     let session = SessionManager::new(
//!         refresher,
//!         Arc::new(MemorySessionStore::new()),
//!         Arc::new(NoopRedirect),
//!     );
//!
//!     // On a 401 from the API: recover, then replay the original request
//!     session.recover_unauthorized().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - **[`types`]**: Session types (`SessionUser`, `SessionConfig`,
//!   `SessionError`)
//! - **[`coordinator`]**: Single-flight gate and waiter queue
//! - **[`session`]**: High-level session orchestrator
//! - **[`client`]**: HTTP refresh client
//! - **[`store`]**: In-process session store
//! - **[`traits`]**: Collaborator seams for injection and testing

pub mod client;
pub mod coordinator;
pub mod session;
pub mod store;
pub mod traits;
pub mod types;

// Re-export commonly used types and functions
pub use client::RefreshClient;
pub use coordinator::{RefreshCoordinator, RefreshGuard, RefreshTicket};
pub use session::SessionManager;
pub use store::MemorySessionStore;
pub use traits::{LoginRedirect, NoopRedirect, SessionRefresher, SessionStore};
pub use types::{AccountRole, SessionConfig, SessionError, SessionUser, LOGIN_PATH};
