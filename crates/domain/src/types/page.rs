//! Pagination envelope

use serde::{Deserialize, Serialize};

/// Paginated listing envelope used by every listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total matching items across all pages
    pub total: u64,
    /// 1-based page number
    pub page: u32,
    pub per_page: u32,
}

impl<T> Page<T> {
    /// Whether any page follows this one
    #[must_use]
    pub fn has_more(&self) -> bool {
        u64::from(self.page) * u64::from(self.per_page) < self.total
    }
}
