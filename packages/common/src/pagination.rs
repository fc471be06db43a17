use serde::{Deserialize, Serialize};

/// Pagination state for a list view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
    /// Total number of matching items across all pages.
    pub total: u64,
}

impl Pagination {
    pub fn new(page: u64, page_size: u64, total: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
            total,
        }
    }

    /// `ceil(total / page_size)`.
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.page_size)
    }

    /// Prev is disabled on the first page.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Next is disabled on (or past) the last page.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}
