//! Page-window envelope primitives shared by list endpoints.
//!
//! A [`PageRequest`] carries validated one-based `page`/`limit` values and a
//! [`PageEnvelope`] wraps the visible window of an already filtered and
//! sorted collection together with the counters clients need to render
//! pagination controls.
//!
//! The window is the half-open slice `[(page - 1) * limit, page * limit)`
//! clamped to the collection bounds. Pages past the end yield an empty item
//! list rather than an error so clients can navigate freely.
//!
//! # Examples
//! ```
//! use pagination::{PageEnvelope, PageRequest};
//!
//! let request = PageRequest::new(2, 9).expect("valid request");
//! let envelope = PageEnvelope::slice((0..12).collect::<Vec<_>>(), &request);
//!
//! assert_eq!(envelope.items(), &[9, 10, 11]);
//! assert_eq!(envelope.total(), 12);
//! assert_eq!(envelope.total_pages(), 2);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Pages are one-based; zero is not addressable.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A zero limit would make every page empty and the page count undefined.
    #[error("limit must be at least 1")]
    ZeroLimit,
}

/// Validated request for one page of a collection.
///
/// ## Invariants
/// - `page >= 1` and `limit >= 1`; both are enforced at construction so the
///   slicing arithmetic in [`PageEnvelope::slice`] cannot divide by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    limit: usize,
}

impl PageRequest {
    /// Page size used when a client does not ask for one.
    pub const DEFAULT_LIMIT: usize = 9;

    /// Construct a request, rejecting zero `page` or `limit`.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when either value is zero.
    pub const fn new(page: usize, limit: usize) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if limit == 0 {
            return Err(PageRequestError::ZeroLimit);
        }
        Ok(Self { page, limit })
    }

    /// First page with the default page size.
    #[must_use]
    pub const fn first() -> Self {
        Self {
            page: 1,
            limit: Self::DEFAULT_LIMIT,
        }
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Maximum number of items per page.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// One visible page of a collection plus the counters describing the whole.
///
/// Serialises with camelCase field names (`totalPages`) to match the wire
/// contract of the list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    items: Vec<T>,
    total: usize,
    total_pages: usize,
    page: usize,
    limit: usize,
}

impl<T> PageEnvelope<T> {
    /// Cut the requested window out of a fully filtered and sorted
    /// collection.
    ///
    /// `total` counts the input collection, `total_pages` is
    /// `ceil(total / limit)`, and the slice bounds are clamped to
    /// `[0, total]` so out-of-range pages produce an empty window.
    #[must_use]
    pub fn slice(items: Vec<T>, request: &PageRequest) -> Self {
        let total = items.len();
        let total_pages = total.div_ceil(request.limit());
        let start = request
            .page()
            .saturating_sub(1)
            .saturating_mul(request.limit())
            .min(total);
        let window = items
            .into_iter()
            .skip(start)
            .take(request.limit())
            .collect();
        Self {
            items: window,
            total,
            total_pages,
            page: request.page(),
            limit: request.limit(),
        }
    }

    /// Items visible on this page, in collection order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        self.items.as_slice()
    }

    /// Size of the collection before windowing.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Number of addressable pages; zero for an empty collection.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// One-based page number this envelope was cut for.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Page size this envelope was cut with.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }
}
