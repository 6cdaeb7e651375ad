//! Pagination
//!
//! Shared page-request parsing and the pagination envelope every listing
//! endpoint returns. The envelope is derived, never persisted.

use serde::{Deserialize, Serialize};

use crate::error::app_error::{AppError, AppResult};

/// Default page size when the client omits `limit`
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound on `limit` (defensive, matches the blog endpoint's cap)
pub const MAX_PAGE_SIZE: u32 = 100;

/// A validated page request
///
/// `page` and `limit` default rather than reject: a missing page is page 1,
/// a missing limit is [`DEFAULT_PAGE_SIZE`]. Zero or negative values are a
/// client error because the offset computation would be meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build from optional raw values, defaulting absent fields
    pub fn from_raw(page: Option<i64>, limit: Option<i64>) -> AppResult<Self> {
        let page = match page {
            None => 1,
            Some(p) if p >= 1 => p as u32,
            Some(p) => {
                return Err(AppError::bad_request(format!(
                    "page must be a positive integer (got {p})"
                )));
            }
        };

        let limit = match limit {
            None => DEFAULT_PAGE_SIZE,
            Some(l) if l >= 1 && l <= MAX_PAGE_SIZE as i64 => l as u32,
            Some(l) => {
                return Err(AppError::bad_request(format!(
                    "limit must be between 1 and {MAX_PAGE_SIZE} (got {l})"
                )));
            }
        };

        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Offset into the result set: `(page - 1) * limit`
    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.limit as i64
    }
}

/// Pagination metadata returned alongside every page of results
///
/// Invariant: `pages == ceil(total / limit)` and `total` counts rows matching
/// the same predicate as the page query, without the pagination slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: i64,
    pub pages: i64,
    #[serde(rename = "currentPage")]
    pub current_page: u32,
    pub limit: u32,
}

impl Pagination {
    /// Derive the envelope from a total count and the request that produced it
    pub fn new(total: i64, request: &PageRequest) -> Self {
        let limit = request.limit() as i64;
        Self {
            total,
            pages: total.div_ceil(limit),
            current_page: request.page(),
            limit: request.limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let req = PageRequest::from_raw(None, None).unwrap();
        assert_eq!(req.page(), 1);
        assert_eq!(req.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_offset_math() {
        let req = PageRequest::from_raw(Some(3), Some(20)).unwrap();
        assert_eq!(req.offset(), 40);
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(PageRequest::from_raw(Some(0), None).is_err());
        assert!(PageRequest::from_raw(Some(-1), None).is_err());
        assert!(PageRequest::from_raw(None, Some(0)).is_err());
        assert!(PageRequest::from_raw(None, Some(101)).is_err());
    }

    #[test]
    fn test_pages_is_ceil_of_total_over_limit() {
        let req = PageRequest::from_raw(Some(1), Some(10)).unwrap();

        assert_eq!(Pagination::new(0, &req).pages, 0);
        assert_eq!(Pagination::new(1, &req).pages, 1);
        assert_eq!(Pagination::new(10, &req).pages, 1);
        assert_eq!(Pagination::new(11, &req).pages, 2);
        assert_eq!(Pagination::new(99, &req).pages, 10);
    }

    #[test]
    fn test_envelope_reflects_request() {
        let req = PageRequest::from_raw(Some(4), Some(25)).unwrap();
        let envelope = Pagination::new(87, &req);
        assert_eq!(envelope.total, 87);
        assert_eq!(envelope.pages, 4);
        assert_eq!(envelope.current_page, 4);
        assert_eq!(envelope.limit, 25);
    }
}
