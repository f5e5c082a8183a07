//! Pagination clamping shared by list endpoints.

/// Clamp a user-provided page size to valid bounds.
pub fn clamp_per_page(per_page: Option<i64>, default: i64, max: i64) -> i64 {
    per_page.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided 1-based page number.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Compute the total number of pages for a row count.
pub fn total_pages(count: i64, per_page: i64) -> i64 {
    if count <= 0 {
        0
    } else {
        (count + per_page - 1) / per_page
    }
}
