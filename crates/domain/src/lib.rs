//! # HireLoop Domain
//!
//! Platform domain types for the HireLoop client SDK.
//!
//! This crate contains:
//! - Job posting and application types
//! - Blog post types
//! - Profile types
//! - AI assist request/response types
//! - Platform constants
//!
//! ## Architecture
//! - No dependencies on other HireLoop crates
//! - Only external dependencies allowed
//! - Pure data structures; validation and business rules live server-side

pub mod constants;
pub mod types;

// Re-export commonly used items
pub use types::*;
