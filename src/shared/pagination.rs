//! Pagination
//!
//! Page/limit arithmetic for list endpoints and the paginated result shape
//! returned to clients (`docs`, `totalDocs`, `hasNextPage`, ...).

use serde::{Deserialize, Serialize};

/// Page used when the client sends none
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the client sends none
pub const DEFAULT_LIMIT: u32 = 10;

/// Largest page size a client may request
pub const MAX_LIMIT: u32 = 100;

/// Normalized page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u32,
    pub limit: u32,
}

impl PageParams {
    /// Build from optional query values. Page is at least 1, limit is
    /// clamped to `1..=MAX_LIMIT`.
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }

    /// Rows to skip
    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.limit as i64
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus navigation metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub docs: Vec<T>,
    pub total_docs: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
    /// 1-based index of the first document on this page
    pub paging_counter: u64,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
}

impl<T> Paginated<T> {
    pub fn new(docs: Vec<T>, total_docs: u64, params: PageParams) -> Self {
        let limit = params.limit as u64;
        let total_pages = total_docs.div_ceil(limit);
        let has_prev_page = params.page > 1;
        let has_next_page = (params.page as u64) < total_pages;

        Self {
            docs,
            total_docs,
            page: params.page,
            limit: params.limit,
            total_pages,
            paging_counter: (params.page as u64 - 1) * limit + 1,
            has_prev_page,
            has_next_page,
            prev_page: has_prev_page.then(|| params.page - 1),
            next_page: has_next_page.then(|| params.page + 1),
        }
    }
}
