use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

/// Raw `page`/`size` query parameters of `GET /users`
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Zero-based page index (default 0)
    pub page: Option<usize>,
    /// Page size, clamped to 1..=100 (default 20)
    pub size: Option<usize>,
}

/// Normalized page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    size: usize,
}

impl PageRequest {
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }

    pub fn limit(&self) -> usize {
        self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

impl From<PageParams> for PageRequest {
    fn from(params: PageParams) -> Self {
        Self::new(
            params.page.unwrap_or(0),
            params.size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

/// One page of items plus the total element count
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: usize) -> Self {
        Self { items, total }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// Pagination metadata rendered with list responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageMeta {
    pub number: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

impl PageMeta {
    pub fn new(request: &PageRequest, total_elements: usize) -> Self {
        Self {
            number: request.page(),
            size: request.size(),
            total_elements,
            total_pages: total_elements.div_ceil(request.size()),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0 && self.number - 1 < self.total_pages
    }

    pub fn has_next(&self) -> bool {
        self.next().is_some()
    }

    /// Index of the following page, if it exists
    pub fn next(&self) -> Option<usize> {
        self.number
            .checked_add(1)
            .filter(|next| *next < self.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = PageRequest::from(PageParams::default());
        assert_eq!(request, PageRequest::new(0, 20));
        assert_eq!(request.offset(), 0);
        assert_eq!(request.limit(), 20);
    }

    #[test]
    fn test_size_is_clamped() {
        assert_eq!(PageRequest::new(0, 0).size(), 1);
        assert_eq!(PageRequest::new(0, 1000).size(), 100);
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(3, 10).offset(), 30);
        assert_eq!(PageRequest::new(usize::MAX, 10).offset(), usize::MAX);
    }

    #[test]
    fn test_meta_math() {
        let meta = PageMeta::new(&PageRequest::new(0, 10), 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_previous());
        assert!(!meta.has_next());

        let meta = PageMeta::new(&PageRequest::new(1, 10), 21);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_previous());
        assert!(meta.has_next());

        let meta = PageMeta::new(&PageRequest::new(2, 10), 20);
        assert_eq!(meta.total_pages, 2);
        assert!(meta.has_previous());
        assert!(!meta.has_next());
    }

    #[test]
    fn test_last_representable_page_has_no_next() {
        let meta = PageMeta::new(&PageRequest::new(usize::MAX, 20), 45);
        assert_eq!(meta.number, usize::MAX);
        assert!(!meta.has_next());
        assert_eq!(meta.next(), None);
        assert!(!meta.has_previous());
    }

    #[test]
    fn test_page_map_keeps_total() {
        let page = Page::new(vec![1, 2], 7).map(|n| n * 10);
        assert_eq!(page, Page::new(vec![10, 20], 7));
    }
}
