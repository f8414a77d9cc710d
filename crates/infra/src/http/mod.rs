//! HTTP transport layer
//!
//! Transport concerns only: timeouts, retry with exponential backoff for
//! server errors and connection failures, and the shared cookie jar.
//! Authentication and unauthorized recovery live a layer up in
//! [`crate::api`].

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
