use crate::models::{PaginatedResponse, OPERATIONS_PAGE_SIZE};

/// One loaded page of a paginated listing
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl<T> Page<T> {
    /// Build a page from a backend response for the requested page number
    pub fn from_response(requested_page: u32, response: PaginatedResponse<T>) -> Self {
        let total_pages = response.count.div_ceil(OPERATIONS_PAGE_SIZE).max(1) as u32;
        Page {
            items: response.results,
            current_page: requested_page.clamp(1, total_pages),
            total_pages,
            total_items: response.count,
        }
    }

    /// Page number after this one, if any
    pub fn next(&self) -> Option<u32> {
        (!self.is_last()).then(|| self.current_page + 1)
    }

    /// Page number before this one, if any
    pub fn previous(&self) -> Option<u32> {
        (!self.is_first()).then(|| self.current_page - 1)
    }

    /// Check if on first page
    pub fn is_first(&self) -> bool {
        self.current_page <= 1
    }

    /// Check if on last page
    pub fn is_last(&self) -> bool {
        self.current_page >= self.total_pages
    }

    /// Footer line such as "Page 2/5 (43 operations)"
    pub fn footer(&self) -> String {
        format!(
            "Page {}/{} ({} operations)",
            self.current_page, self.total_pages, self.total_items
        )
    }
}
