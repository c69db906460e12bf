//! Offset pagination primitives shared by list endpoints.
//!
//! Clients send optional `page` and `limit` query parameters. Out-of-range
//! values are never rejected; they are normalised so every list request
//! resolves to a concrete window:
//!
//! - `page` below 1 (or absent) becomes 1.
//! - `limit` outside `[MIN_LIMIT, MAX_LIMIT]` (or absent) becomes
//!   [`DEFAULT_LIMIT`].
//!
//! ```
//! use pagination::PageRequest;
//!
//! let request = PageRequest::normalise(Some(3), Some(20));
//! assert_eq!(request.offset(), 40);
//!
//! let clamped = PageRequest::normalise(Some(0), Some(500));
//! assert_eq!((clamped.page(), clamped.limit()), (1, 10));
//! ```

use serde::{Deserialize, Serialize};

/// Smallest accepted page size.
pub const MIN_LIMIT: i64 = 1;
/// Largest accepted page size.
pub const MAX_LIMIT: i64 = 100;
/// Page size substituted when the requested one is absent or out of range.
pub const DEFAULT_LIMIT: i64 = 10;
/// First page number.
pub const FIRST_PAGE: i64 = 1;

/// A normalised page window.
///
/// ## Invariants
/// - `page >= 1`
/// - `MIN_LIMIT <= limit <= MAX_LIMIT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    /// Normalise raw client input into a valid window.
    #[must_use]
    pub fn normalise(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.filter(|value| *value >= FIRST_PAGE).unwrap_or(FIRST_PAGE);
        let limit = limit
            .filter(|value| (MIN_LIMIT..=MAX_LIMIT).contains(value))
            .unwrap_or(DEFAULT_LIMIT);
        Self { page, limit }
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> i64 {
        self.page
    }

    /// Number of rows per page.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.limit
    }

    /// Rows to skip before the window starts, `(page - 1) * limit`.
    ///
    /// Saturates instead of overflowing for absurdly large page numbers; such
    /// windows simply return no rows.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Build the response metadata for this window.
    #[must_use]
    pub const fn info(&self, total: i64) -> PageInfo {
        PageInfo {
            total,
            page: self.page,
            limit: self.limit,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::normalise(None, None)
    }
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total number of rows, independent of the window.
    pub total: i64,
    /// One-based page number that was served.
    pub page: i64,
    /// Page size that was served.
    pub limit: i64,
}
