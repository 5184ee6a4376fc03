use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 25;

/// One-based page position. Both fields are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Pagination {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn with_page(self, page: usize) -> Self {
        Self::new(page, self.page_size)
    }

    pub fn first_page(self) -> Self {
        self.with_page(1)
    }

    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Number of pages needed for `total` records. Zero records means zero pages.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// The `[(page-1)*size, page*size)` window of `items`, clamped to its bounds.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_clamped_to_one() {
        let p = Pagination::new(0, 0);
        assert_eq!(p.page(), 1);
        assert_eq!(p.page_size(), 1);
    }

    #[test]
    fn test_slice_windows() {
        let items: Vec<u32> = (1..=7).collect();
        let p = Pagination::new(2, 3);
        assert_eq!(p.slice(&items), &[4, 5, 6]);
        assert_eq!(p.with_page(3).slice(&items), &[7]);
        assert!(p.with_page(4).slice(&items).is_empty());
        assert_eq!(p.page_count(items.len()), 3);
        assert_eq!(p.page_count(0), 0);
    }
}
