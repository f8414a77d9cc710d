//! Testing utilities and helpers
//!
//! Mock implementations of the session collaborator traits, shared by this
//! crate's unit tests and by downstream crates' integration tests.
//! Production code must not depend on anything in here.
//!
//! ## Usage
//!
//! ```rust
//! use hireloop_common::testing::MockSessionRefresher;
//!
//! let refresher = MockSessionRefresher::succeeding();
//! assert_eq!(refresher.call_count(), 0);
//! ```

pub mod mocks;

pub use mocks::{MockSessionRefresher, MockSessionStore, RecordingRedirect};
