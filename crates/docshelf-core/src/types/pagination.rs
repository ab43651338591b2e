//! Pagination types for list endpoints.
//!
//! The page contract: pages are 1-based, a page number past the end clamps
//! to the last page, and the `size` of a returned page is the number of
//! items actually on it (the last page may be short).

use serde::{Deserialize, Serialize};

/// Default page size.
const DEFAULT_PAGE_SIZE: u64 = 25;
/// Maximum page size.
const MAX_PAGE_SIZE: u64 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub size: u64,
}

impl PageRequest {
    /// Create a new page request, clamping the size into the allowed range.
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page: page.max(1),
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Calculate the SQL `OFFSET` value for the effective (clamped) page.
    pub fn offset_for(&self, total_items: u64) -> u64 {
        (self.effective_page(total_items) - 1) * self.size
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        self.size
    }

    /// The page that will actually be served: the requested page, clamped
    /// to the last page of the set.
    pub fn effective_page(&self, total_items: u64) -> u64 {
        self.page.min(total_pages(total_items, self.size))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Total number of pages for a set; an empty set still has one page.
pub fn total_pages(total_items: u64, page_size: u64) -> u64 {
    if total_items == 0 {
        1
    } else {
        total_items.div_ceil(page_size)
    }
}

/// One page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// The page actually served (1-based, clamped).
    pub page: u64,
    /// Number of items on this page.
    pub size: u64,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Create a page from items already cut to page boundaries.
    pub fn new(items: Vec<T>, effective_page: u64, page_size: u64, total_items: u64) -> Self {
        Self {
            size: items.len() as u64,
            items,
            page: effective_page,
            total_items,
            total_pages: total_pages(total_items, page_size),
        }
    }

    /// Map the items of this page, preserving the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Paginate an in-memory set.
///
/// This is the pure counterpart to SQL `LIMIT`/`OFFSET`, used where
/// filtering already happened in process. Independent of any storage
/// adapter so it can be tested without a database.
pub fn paginate_vec<T>(mut items: Vec<T>, request: &PageRequest) -> Page<T> {
    let total_items = items.len() as u64;
    let page = request.effective_page(total_items);
    let start = ((page - 1) * request.size).min(total_items) as usize;
    let end = (start + request.size as usize).min(items.len());
    let page_items: Vec<T> = items.drain(start..end).collect();
    Page::new(page_items, page, request.size, total_items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_clamped_to_max() {
        let req = PageRequest::new(1, 10_000);
        assert_eq!(req.size, 100);
        let req = PageRequest::new(0, 0);
        assert_eq!(req.page, 1);
        assert_eq!(req.size, 1);
    }

    #[test]
    fn test_total_pages_empty_set_is_one() {
        assert_eq!(total_pages(0, 25), 1);
        assert_eq!(total_pages(1, 25), 1);
        assert_eq!(total_pages(26, 25), 2);
        assert_eq!(total_pages(50, 25), 2);
    }

    #[test]
    fn test_overshoot_clamps_to_last_page() {
        // 23 items, page size 5 -> 5 pages, last page has 3 items.
        let items: Vec<u32> = (0..23).collect();
        let req = PageRequest::new(10, 5);
        let page = paginate_vec(items, &req);
        assert_eq!(page.page, 5);
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.total_items, 23);
        assert_eq!(page.size, 3);
        assert_eq!(page.items, vec![20, 21, 22]);
    }

    #[test]
    fn test_even_division_last_page_is_full() {
        let items: Vec<u32> = (0..20).collect();
        let req = PageRequest::new(9, 5);
        let page = paginate_vec(items, &req);
        assert_eq!(page.page, 4);
        assert_eq!(page.size, 5);
        assert_eq!(page.items, vec![15, 16, 17, 18, 19]);
    }

    #[test]
    fn test_first_page_of_empty_set() {
        let page = paginate_vec(Vec::<u32>::new(), &PageRequest::default());
        assert_eq!(page.page, 1);
        assert_eq!(page.size, 0);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_middle_page() {
        let items: Vec<u32> = (0..23).collect();
        let req = PageRequest::new(2, 5);
        let page = paginate_vec(items, &req);
        assert_eq!(page.items, vec![5, 6, 7, 8, 9]);
        assert_eq!(page.size, 5);
    }
}
