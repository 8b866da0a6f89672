use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Meta {
    pub paging: Paging,
}

/// Paging block of a list response. `total_items` counts every record that
/// matched the search and filters, not just the ones on this page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    pub page: i64,
    pub size: i64,
    pub total_items: i64,
    #[serde(default)]
    pub total_pages: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub meta: Meta,
    pub data: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    pub fn total_items(&self) -> i64 {
        self.meta.paging.total_items
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Response<T> {
    pub data: T,
}
