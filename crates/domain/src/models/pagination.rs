//! Offset pagination metadata shared by list endpoints.

use serde::Serialize;

/// Default items per page for list endpoints.
pub const DEFAULT_PER_PAGE: i64 = 50;

/// Maximum items per page for list endpoints.
pub const MAX_PER_PAGE: i64 = 100;

/// Clamp a requested page number (1-indexed).
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Clamp a requested page size to 1..=MAX_PER_PAGE.
pub fn clamp_per_page(per_page: Option<i64>) -> i64 {
    per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let total_pages = (total + per_page - 1) / per_page;
        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(None), 1);
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_page(Some(-3)), 1);
        assert_eq!(clamp_page(Some(7)), 7);
    }

    #[test]
    fn test_clamp_per_page() {
        assert_eq!(clamp_per_page(None), DEFAULT_PER_PAGE);
        assert_eq!(clamp_per_page(Some(0)), 1);
        assert_eq!(clamp_per_page(Some(1000)), MAX_PER_PAGE);
        assert_eq!(clamp_per_page(Some(20)), 20);
    }

    #[test]
    fn test_pagination_total_pages_rounds_up() {
        let p = Pagination::new(1, 50, 101);
        assert_eq!(p.total_pages, 3);

        let exact = Pagination::new(1, 50, 100);
        assert_eq!(exact.total_pages, 2);

        let empty = Pagination::new(1, 50, 0);
        assert_eq!(empty.total_pages, 0);
    }
}
