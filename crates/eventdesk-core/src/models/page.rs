use serde::{Deserialize, Serialize};

/// One page of a server-paginated listing.
///
/// `current_page` and `last_page` always come from the server response;
/// they are never advanced on the client side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub last_page: u32,
    pub total: Option<u64>,
    pub per_page: Option<u32>,
}

/// Wire shape of a paginated response: `{data, current_page, last_page}`.
///
/// Laravel-style paginators also send `total` and `per_page`; both are
/// optional here.
#[derive(Debug, Clone, Deserialize)]
pub struct PageResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    pub current_page: u32,
    pub last_page: u32,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

impl<T> From<PageResponse<T>> for Page<T> {
    fn from(resp: PageResponse<T>) -> Self {
        // Pages are 1-based and the last page is never before the current one
        let current_page = resp.current_page.max(1);
        let last_page = resp.last_page.max(current_page);
        Self {
            items: resp.data,
            current_page,
            last_page,
            total: resp.total,
            per_page: resp.per_page,
        }
    }
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `page` is a valid target for navigation from this page.
    pub fn contains_page(&self, page: u32) -> bool {
        (1..=self.last_page).contains(&page)
    }

    pub fn next_page(&self) -> Option<u32> {
        (self.current_page < self.last_page).then(|| self.current_page + 1)
    }

    pub fn prev_page(&self) -> Option<u32> {
        (self.current_page > 1).then(|| self.current_page - 1)
    }
}
