use std::collections::HashMap;

/// Fixed page size of every question listing.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Reads the `page` query parameter.
/// # Example query
/// `/questions?page=2`
///
/// A missing key, or anything that is not a non-negative integer, falls back
/// to the first page instead of rejecting the request.
pub fn extract_page(params: &HashMap<String, String>) -> u32 {
    params
        .get("page")
        .and_then(|page| page.trim().parse::<u32>().ok())
        .unwrap_or(1)
}

/// Cuts page `page` (1-based) of `page_size` items out of `items`, keeping
/// their order. Page 0 and pages past the end are empty.
pub fn paginate<T>(items: Vec<T>, page: u32, page_size: usize) -> Vec<T> {
    let Some(index) = (page as usize).checked_sub(1) else {
        return Vec::new();
    };
    let start = index.saturating_mul(page_size);
    items.into_iter().skip(start).take(page_size).collect()
}
