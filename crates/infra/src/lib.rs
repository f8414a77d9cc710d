//! # HireLoop Infrastructure
//!
//! Infrastructure implementations for the HireLoop client SDK.
//!
//! This crate contains:
//! - HTTP transport (retries, timeouts, cookie jar wiring)
//! - Platform API client with transparent session recovery
//! - Typed command wrappers for backend operations
//!
//! ## Architecture
//! - Session machinery comes from `hireloop-common`
//! - Wire types come from `hireloop-domain`
//! - Contains all "impure" code (network I/O)

pub mod api;
pub mod http;

// Re-export commonly used items
pub use api::*;
pub use http::*;
