//! Pagination utilities
//!
//! The table view shows a fixed number of records per page. `Page` slices
//! without clamping; `calculate_pagination` is for callers that want an
//! out-of-range request pulled back into bounds.

use serde::{Deserialize, Serialize};

/// Default page size for the record table
pub const PAGE_SIZE: usize = 5;

/// A requested page (1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub index: usize,
    pub size: usize,
}

impl Page {
    /// Page `index` with the default page size
    pub fn new(index: usize) -> Self {
        Self::with_size(index, PAGE_SIZE)
    }

    pub fn with_size(index: usize, size: usize) -> Self {
        Self { index, size }
    }

    /// Offset of the first item, `None` for index 0 or a zero page size
    pub fn offset(&self) -> Option<usize> {
        if self.size == 0 {
            return None;
        }
        self.index.checked_sub(1)?.checked_mul(self.size)
    }

    /// Items on this page; empty when the page lies outside `items`
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        match self.offset() {
            Some(start) if start < items.len() => {
                let end = start.saturating_add(self.size).min(items.len());
                &items[start..end]
            }
            _ => &[],
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Number of pages needed for `total` items, never less than 1
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// Pagination metadata calculated from total results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: usize,
    /// Total number of pages
    pub total_pages: usize,
    /// Offset of the first item on the page
    pub offset: usize,
}

/// Calculate pagination metadata from total results and requested page
///
/// Ensures page is within valid bounds [1, total_pages]
///
/// # Examples
/// ```
/// use roster_common::pagination::calculate_pagination;
///
/// // 12 results at 5 per page = 3 pages (5 + 5 + 2)
/// let p = calculate_pagination(12, 2, 5);
/// assert_eq!(p.page, 2);
/// assert_eq!(p.total_pages, 3);
/// assert_eq!(p.offset, 5);
///
/// // Requesting out-of-bounds page gets clamped
/// let p = calculate_pagination(12, 99, 5);
/// assert_eq!(p.page, 3);
/// assert_eq!(p.offset, 10);
/// ```
pub fn calculate_pagination(total_results: usize, requested_page: usize, page_size: usize) -> Pagination {
    let total_pages = total_pages(total_results, page_size);
    let page = requested_page.clamp(1, total_pages);
    let offset = (page - 1) * page_size;

    Pagination {
        page,
        total_pages,
        offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_normal() {
        let p = calculate_pagination(12, 2, 5);
        assert_eq!(p.page, 2);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.offset, 5);
    }

    #[test]
    fn test_pagination_out_of_bounds_high() {
        let p = calculate_pagination(7, 99, 5);
        assert_eq!(p.page, 2); // Clamped to last page
        assert_eq!(p.total_pages, 2);
        assert_eq!(p.offset, 5);
    }

    #[test]
    fn test_pagination_out_of_bounds_low() {
        let p = calculate_pagination(7, 0, 5);
        assert_eq!(p.page, 1); // Clamped to first page
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_pagination_empty_still_has_one_page() {
        let p = calculate_pagination(0, 1, 5);
        assert_eq!(p.page, 1);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_pagination_exact_page_boundary() {
        let p = calculate_pagination(10, 2, 5);
        assert_eq!(p.total_pages, 2);
        assert_eq!(p.offset, 5);
    }

    #[test]
    fn test_page_slice_last_partial_page() {
        let items: Vec<u32> = (0..12).collect();
        assert_eq!(Page::new(3).slice(&items), &[10, 11]);
    }

    #[test]
    fn test_page_slice_out_of_range_is_empty() {
        let items: Vec<u32> = (0..12).collect();
        assert!(Page::new(4).slice(&items).is_empty());
        assert!(Page::new(0).slice(&items).is_empty());
        assert!(Page::with_size(1, 0).slice(&items).is_empty());
    }
}
