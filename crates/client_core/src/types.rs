use serde::Serialize;
use shared::domain::CategoryId;

/// Zero-based page request as sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page_index: u32,
    pub page_size: u32,
}

/// What the listing view is showing: exactly one mode per navigation event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ListingQuery {
    CategoryBrowse {
        category_id: CategoryId,
        category_name: String,
    },
    KeywordSearch {
        keyword: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRequest {
    pub query: ListingQuery,
    pub page: PageRequest,
}

/// Monotonic tag attached to every issued listing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct QuerySeq(pub u64);

impl std::fmt::Display for QuerySeq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
