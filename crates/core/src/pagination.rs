//! Shared pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// One page of a repository listing plus the unfiltered row count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64) -> Self {
        Self { items, total }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// Limit/offset pair derived from a 1-based page number.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub limit: i64,
    pub offset: i64,
}

impl PageRequest {
    pub const DEFAULT_PAGE_SIZE: i64 = 20;
    pub const MAX_PAGE_SIZE: i64 = 100;

    /// Clamp user-supplied paging input to sane bounds.
    pub fn new(page: i64, page_size: i64) -> Self {
        let page = page.max(1);
        let limit = page_size.clamp(1, Self::MAX_PAGE_SIZE);
        Self {
            limit,
            offset: (page - 1) * limit,
        }
    }

    /// 1-based page number this request corresponds to, after clamping.
    pub fn page_number(&self) -> i64 {
        self.offset / self.limit + 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}
