//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_PAGE_NUMBER;

const MAX_SQL_OFFSET: u64 = i64::MAX as u64;

/// A requested page (1-indexed) of a fixed size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    /// Pages below 1 are clamped to the first page and a zero page size to 1.
    /// The page is capped so that its row offset still fits a signed 64-bit
    /// SQL `OFFSET`.
    pub fn new(page: u64, per_page: u64) -> Self {
        let per_page = per_page.max(1);
        let last_addressable = MAX_SQL_OFFSET / per_page;

        Self {
            page: page.clamp(DEFAULT_PAGE_NUMBER, last_addressable),
            per_page,
        }
    }

    /// Zero-based page index as used by the sea-orm paginator
    pub fn index(&self) -> u64 {
        self.page.saturating_sub(1)
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl<T> Paginated<T> {
    /// Create new paginated response
    pub fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        let PageRequest { page, per_page } = request;
        let total_pages = total.div_ceil(per_page);

        Self {
            data,
            meta: PaginationMeta {
                page,
                per_page,
                total,
                total_pages,
                has_previous_page: page > 1,
                has_next_page: page < total_pages,
            },
        }
    }

    /// Transform every item while keeping the page metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
