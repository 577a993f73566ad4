//! Wire DTOs shared across routers.

use serde::{Deserialize, Serialize};

use markethub_core::pagination::{Page, PageRequest};

/// Paginated list envelope body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub has_more: bool,
}

impl<T> Paginated<T> {
    /// Build from the clamped request the query actually ran with, so the
    /// echoed page number matches the returned rows.
    pub fn from_page(page: Page<T>, request: &PageRequest) -> Self {
        let number = request.page_number();
        let has_more = number * request.limit < page.total;
        Self {
            data: page.items,
            total: page.total,
            page: number,
            page_size: request.limit,
            has_more,
        }
    }
}

/// Query-string paging parameters, 1-based.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    PageRequest::DEFAULT_PAGE_SIZE
}

impl PageQuery {
    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: markethub_core::users::User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_more_reflects_remaining_rows() {
        let page = Page::new(vec![1, 2, 3], 7);
        let body = Paginated::from_page(page, &PageRequest::new(1, 3));
        assert!(body.has_more);

        let page = Page::new(vec![7], 7);
        let body = Paginated::from_page(page, &PageRequest::new(3, 3));
        assert!(!body.has_more);
    }

    #[test]
    fn page_zero_is_reported_as_page_one() {
        let request = PageQuery {
            page: 0,
            page_size: 3,
        }
        .request();

        let body = Paginated::from_page(Page::new(vec![1, 2, 3], 7), &request);
        assert_eq!(body.page, 1);
        assert!(body.has_more);
    }
}
