use shared::{
    config::PaginationConfig,
    error::{AppError, AppResult},
};

pub const INVALID_PAGE: &str = "Invalid page.";

/// 1-based page number plus an already-capped page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    page_size: u64,
}

impl PageRequest {
    /// A missing or zero `page_size` falls back to the configured default;
    /// anything larger than the configured maximum is capped.
    pub fn new(page: Option<u64>, page_size: Option<u64>, config: &PaginationConfig) -> Self {
        let page_size = match page_size {
            None | Some(0) => config.default_page_size,
            Some(n) => n.min(config.max_page_size),
        };
        Self {
            page: page.unwrap_or(1),
            page_size,
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }
}

#[derive(Debug)]
pub struct Page<T> {
    pub count: u64,
    pub page: u64,
    pub page_size: u64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Cuts one page out of the complete, already ordered result set.
    ///
    /// Page 1 always exists, even for an empty set. Any other page past the
    /// end is reported as not found.
    pub fn paginate(all: Vec<T>, request: PageRequest) -> AppResult<Self> {
        let count = all.len() as u64;
        let PageRequest { page, page_size } = request;
        let last_page = count.div_ceil(page_size).max(1);
        if page == 0 || page > last_page {
            return Err(AppError::EntityNotFound(INVALID_PAGE.into()));
        }

        let offset = (page - 1) * page_size;
        let items = all
            .into_iter()
            .skip(offset as usize)
            .take(page_size as usize)
            .collect();

        Ok(Self {
            count,
            page,
            page_size,
            items,
        })
    }

    pub fn has_next(&self) -> bool {
        self.page * self.page_size < self.count
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            page: self.page,
            page_size: self.page_size,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PaginationConfig {
        PaginationConfig::new(5, 5)
    }

    #[test]
    fn page_size_defaults_and_caps() {
        assert_eq!(PageRequest::new(None, None, &config()).page_size(), 5);
        assert_eq!(PageRequest::new(None, Some(0), &config()).page_size(), 5);
        assert_eq!(PageRequest::new(None, Some(2), &config()).page_size(), 2);
        assert_eq!(PageRequest::new(None, Some(50), &config()).page_size(), 5);
        assert_eq!(PageRequest::new(None, None, &config()).page(), 1);
    }

    #[test]
    fn paginate_slices_in_order() {
        let req = PageRequest::new(Some(2), Some(2), &config());
        let page = Page::paginate((1..=5).collect::<Vec<_>>(), req).unwrap();
        assert_eq!(page.items, vec![3, 4]);
        assert_eq!(page.count, 5);
        assert!(page.has_next());
        assert!(page.has_previous());

        let req = PageRequest::new(Some(3), Some(2), &config());
        let page = Page::paginate((1..=5).collect::<Vec<_>>(), req).unwrap();
        assert_eq!(page.items, vec![5]);
        assert!(!page.has_next());
    }

    #[test]
    fn first_page_of_empty_set_is_valid() {
        let page = Page::<i32>::paginate(vec![], PageRequest::new(None, None, &config())).unwrap();
        assert!(page.items.is_empty());
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn out_of_range_pages_are_not_found() {
        for page in [0, 2] {
            let req = PageRequest::new(Some(page), None, &config());
            let err = Page::paginate(vec![1, 2, 3], req).unwrap_err();
            assert!(matches!(err, AppError::EntityNotFound(_)));
        }
    }
}
