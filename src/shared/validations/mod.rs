/// Default page size for list endpoints
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Upper bound on the page size a client may request
pub const MAX_PAGE_SIZE: u32 = 100;

/// Normalize optional paging input into a 1-based page and a bounded size.
pub fn validate_pagination(page: Option<u32>, page_size: Option<u32>) -> (u32, u32) {
    let page = page.unwrap_or(1).max(1);
    let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    (page, page_size)
}
