//! Offset pagination
//!
//! `Page` serializes with the same field names clients of the forum already
//! consume (`content`, `totalElements`, `number`, ...). Page numbers are 0-based.

use serde::{Deserialize, Serialize};

/// A request for one page of results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    pub const DEFAULT_SIZE: u64 = 20;
    pub const MAX_SIZE: u64 = 100;
    /// Keeps `offset()` within a Postgres `BIGINT`
    pub const MAX_PAGE: u64 = i64::MAX as u64 / Self::MAX_SIZE;

    /// Build a request from raw query values, falling back to defaults for
    /// out-of-range input instead of rejecting it.
    pub fn new(page: Option<i64>, size: Option<i64>) -> Self {
        let page = (page.filter(|p| *p >= 0).unwrap_or(0) as u64).min(Self::MAX_PAGE);
        let size = match size {
            Some(s) if s >= 1 => (s as u64).min(Self::MAX_SIZE),
            _ => Self::DEFAULT_SIZE,
        };
        Self { page, size }
    }

    pub fn offset(&self) -> u64 {
        self.page * self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub size: u64,
    pub number: u64,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(request.size);
        Self {
            empty: content.is_empty(),
            content,
            total_elements,
            total_pages,
            size: request.size,
            number: request.page,
            first: request.page == 0,
            last: request.page + 1 >= total_pages,
        }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            size: self.size,
            number: self.number,
            first: self.first,
            last: self.last,
            empty: self.empty,
        }
    }
}
