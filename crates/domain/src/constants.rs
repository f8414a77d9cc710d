//! Platform constants
//!
//! Centralized location for domain-level constants shared by the API
//! wrappers.

// Pagination defaults mirrored from the backend
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

// Assist generation limit enforced server-side; clients use it to pre-trim
// prompts before spending a round trip
pub const MAX_ASSIST_PROMPT_CHARS: usize = 4_000;
