//! Pagination over a materialized ranking.
//!
//! Paging is pure: the sorted sequence is materialized once per pipeline
//! invocation and re-paged without re-fetching. Page numbers are 1-based
//! and must be clamped to `[1, total_pages]` by the caller before paging;
//! out-of-range requests are caller error, not pipeline error.

use serde::{Deserialize, Serialize};

/// Default number of entries shown per page.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 1;

/// Default cap on the number of pages exposed to the UI.
///
/// The displayed page count is capped regardless of how many entries the
/// ranking produced; this is a deliberate UI constraint, kept configurable.
pub const DEFAULT_MAX_PAGES: usize = 5;

// ============================================================================
// Page Params
// ============================================================================

/// Paging parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    /// Entries per page.
    pub items_per_page: usize,
    /// Cap on the exposed page count; `None` means uncapped.
    pub max_pages: Option<usize>,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            max_pages: Some(DEFAULT_MAX_PAGES),
        }
    }
}

impl PageParams {
    /// Creates params with the given page size and the default cap.
    pub fn new(items_per_page: usize) -> Self {
        Self {
            items_per_page: items_per_page.max(1),
            ..Self::default()
        }
    }

    /// Removes the page-count cap.
    pub fn uncapped(mut self) -> Self {
        self.max_pages = None;
        self
    }
}

// ============================================================================
// Page
// ============================================================================

/// One page of a materialized sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The entries on this page.
    pub items: Vec<T>,
    /// 1-based page number this slice corresponds to.
    pub number: usize,
    /// Total pages, after applying the cap.
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Returns true if the page holds no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Computes the exposed page count: `min(ceil(len / per_page), cap)`.
///
/// An empty sequence has zero pages.
pub fn total_pages(len: usize, params: &PageParams) -> usize {
    let per_page = params.items_per_page.max(1);
    let pages = len.div_ceil(per_page);
    match params.max_pages {
        Some(cap) => pages.min(cap),
        None => pages,
    }
}

/// Returns the slice `[(n-1)*per, n*per)` of `items` as page `n`.
///
/// `page_number` is expected to be pre-clamped; values past the end simply
/// yield an empty page rather than panicking.
pub fn paginate<T: Clone>(items: &[T], page_number: usize, params: &PageParams) -> Page<T> {
    let per_page = params.items_per_page.max(1);
    let number = page_number.max(1);
    let total = total_pages(items.len(), params);

    let start = (number - 1).saturating_mul(per_page);
    let end = start.saturating_add(per_page).min(items.len());
    let slice = if start >= items.len() {
        Vec::new()
    } else {
        items[start..end].to_vec()
    };

    Page {
        items: slice,
        number,
        total_pages: total,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_capped_at_five() {
        let params = PageParams::default();
        assert_eq!(total_pages(0, &params), 0);
        assert_eq!(total_pages(1, &params), 1);
        assert_eq!(total_pages(3, &params), 3);
        assert_eq!(total_pages(5, &params), 5);
        // Cap applies regardless of true count
        assert_eq!(total_pages(100, &params), 5);
    }

    #[test]
    fn test_total_pages_uncapped() {
        let params = PageParams::default().uncapped();
        assert_eq!(total_pages(100, &params), 100);
    }

    #[test]
    fn test_total_pages_ceil() {
        let params = PageParams {
            items_per_page: 3,
            max_pages: None,
        };
        assert_eq!(total_pages(7, &params), 3);
        assert_eq!(total_pages(9, &params), 3);
        assert_eq!(total_pages(10, &params), 4);
    }

    #[test]
    fn test_paginate_slices() {
        let items: Vec<u32> = (0..7).collect();
        let params = PageParams {
            items_per_page: 3,
            max_pages: None,
        };

        let first = paginate(&items, 1, &params);
        assert_eq!(first.items, vec![0, 1, 2]);
        assert_eq!(first.total_pages, 3);

        let last = paginate(&items, 3, &params);
        assert_eq!(last.items, vec![6]);
    }

    #[test]
    fn test_paginate_empty_sequence() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 1, &PageParams::default());
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_paginate_past_end_is_empty() {
        let items = vec![1, 2];
        let page = paginate(&items, 9, &PageParams::default());
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 2);
    }
}
