//! Pagination query parameters and the list response envelope.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

/// Hard ceiling for the `limit` query parameter.
const MAX_PAGE_SIZE: u32 = 100;

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<u32>,
}

impl PaginationParams {
    /// Validates pagination parameters and resolves `(page, limit)`.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `limit`: `default_limit` (service-configured, 6 out of the box)
    ///
    /// # Validation
    ///
    /// - Page must be > 0
    /// - Limit must be between 1 and 100
    pub fn resolve(&self, default_limit: u32) -> Result<(u32, u32), String> {
        let page = self.page.unwrap_or(1);
        let limit = self.limit.unwrap_or(default_limit);

        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }

        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(format!("Limit must be between 1 and {MAX_PAGE_SIZE}"));
        }

        Ok((page, limit))
    }
}

/// Converts a 1-indexed page into a SQL `(offset, limit)` pair.
pub fn offset_limit(page: u32, limit: u32) -> (i64, i64) {
    (i64::from(page - 1) * i64::from(limit), i64::from(limit))
}

/// Paginated list envelope: `{count, next, previous, results}`.
///
/// `next`/`previous` are relative URLs preserving the `limit` parameter.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(path: &str, page: u32, limit: u32, count: i64, results: Vec<T>) -> Self {
        let has_next = i64::from(page) * i64::from(limit) < count;
        let next = has_next.then(|| format!("{path}?page={}&limit={limit}", page + 1));
        let previous = (page > 1).then(|| format!("{path}?page={}&limit={limit}", page - 1));

        Self {
            count,
            next,
            previous,
            results,
        }
    }
}
