//! Listing controller: decides browse/search mode per navigation event,
//! keeps pagination sticky across re-navigation, and folds query results
//! into [`ListingState`].
//!
//! Handlers are plain methods that run to completion; the host calls them
//! one at a time in arrival order. Each decision returns an [`IssuedQuery`]
//! that the host executes, then reports back through
//! [`ListingController::on_query_result`] or
//! [`ListingController::on_query_failure`] with the same sequence tag.
//! Only the most recently issued tag is folded.

use serde::Serialize;
use shared::{
    domain::{CategoryId, Product, DEFAULT_CATEGORY_ID, DEFAULT_CATEGORY_NAME},
    error::ReportedFailure,
    protocol::PageResult,
};
use tracing::{debug, info, warn};

use crate::{
    cart::{Cart, CartTotals},
    error::{StorefrontError, StorefrontResult},
    route::{RouteParams, PARAM_ID, PARAM_KEYWORD, PARAM_NAME},
    types::{ListingQuery, ListingRequest, PageRequest, QuerySeq},
};

pub const DEFAULT_PAGE_SIZE: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingState {
    pub items: Vec<Product>,
    pub current_category_id: CategoryId,
    pub current_category_name: String,
    pub search_mode: bool,
    /// One-based.
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub last_category_id_seen: CategoryId,
    pub last_keyword_seen: String,
}

impl Default for ListingState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current_category_id: DEFAULT_CATEGORY_ID,
            current_category_name: String::new(),
            search_mode: false,
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total_elements: 0,
            last_category_id_seen: DEFAULT_CATEGORY_ID,
            last_keyword_seen: String::new(),
        }
    }
}

impl ListingState {
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(u64::from(self.page_size))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedQuery {
    pub seq: QuerySeq,
    pub request: ListingRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldOutcome {
    /// A page was folded into the state.
    Applied,
    /// A failure was recorded; the state is unchanged.
    Reported,
    /// The tag was superseded by a newer query and nothing changed.
    Stale,
}

#[derive(Debug, Default)]
pub struct ListingController {
    state: ListingState,
    last_seq: u64,
    latest: Option<IssuedQuery>,
    failure: Option<ReportedFailure>,
}

impl ListingController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: u32) -> StorefrontResult<Self> {
        if page_size == 0 {
            return Err(StorefrontError::InvalidPageSize(page_size));
        }
        let mut controller = Self::new();
        controller.state.page_size = page_size;
        Ok(controller)
    }

    pub fn state(&self) -> &ListingState {
        &self.state
    }

    pub fn failure(&self) -> Option<&ReportedFailure> {
        self.failure.as_ref()
    }

    pub fn latest_query(&self) -> Option<&IssuedQuery> {
        self.latest.as_ref()
    }

    pub fn on_navigation(&mut self, params: &RouteParams) -> StorefrontResult<IssuedQuery> {
        let query = match decide(params) {
            Ok(query) => query,
            Err(err) => return Err(self.reject(err)),
        };

        match &query {
            ListingQuery::KeywordSearch { keyword } => {
                self.state.search_mode = true;
                if *keyword != self.state.last_keyword_seen {
                    self.state.page_number = 1;
                }
                self.state.last_keyword_seen = keyword.clone();
            }
            ListingQuery::CategoryBrowse {
                category_id,
                category_name,
            } => {
                self.state.search_mode = false;
                self.state.current_category_id = *category_id;
                self.state.current_category_name = category_name.clone();
                if *category_id != self.state.last_category_id_seen {
                    self.state.page_number = 1;
                }
                self.state.last_category_id_seen = *category_id;
            }
        }

        Ok(self.issue(query))
    }

    /// Resets to the first page and re-issues the current mode's query.
    pub fn on_page_size_change(&mut self, new_size: u32) -> StorefrontResult<IssuedQuery> {
        if new_size == 0 {
            return Err(self.reject(StorefrontError::InvalidPageSize(new_size)));
        }
        self.state.page_size = new_size;
        self.state.page_number = 1;
        let query = self.current_query();
        Ok(self.issue(query))
    }

    pub fn on_page_change(&mut self, page_number: u32) -> StorefrontResult<IssuedQuery> {
        if page_number == 0 {
            return Err(self.reject(StorefrontError::InvalidPageNumber(page_number)));
        }
        self.state.page_number = page_number;
        let query = self.current_query();
        Ok(self.issue(query))
    }

    pub fn on_query_result(&mut self, seq: QuerySeq, result: PageResult<Product>) -> FoldOutcome {
        if !self.is_latest(seq) {
            warn!(%seq, "discarding stale listing result");
            return FoldOutcome::Stale;
        }

        info!(
            %seq,
            items = result.items.len(),
            page_number = result.page_number,
            total_elements = result.total_elements,
            "listing page loaded"
        );
        self.state.items = result.items;
        self.state.page_number = result.page_number.max(1);
        // Page size stays positive even if a catalog reports zero.
        if result.page_size > 0 {
            self.state.page_size = result.page_size;
        } else {
            warn!(%seq, "catalog reported page size 0, keeping {}", self.state.page_size);
        }
        self.state.total_elements = result.total_elements;
        self.failure = None;
        FoldOutcome::Applied
    }

    pub fn on_query_failure(&mut self, seq: QuerySeq, error: &StorefrontError) -> FoldOutcome {
        if !self.is_latest(seq) {
            warn!(%seq, error = %error, "discarding stale listing failure");
            return FoldOutcome::Stale;
        }
        warn!(%seq, error = %error, "listing query failed");
        self.failure = Some(error.report());
        FoldOutcome::Reported
    }

    pub fn on_add_to_cart(&self, product: &Product, cart: &mut Cart) -> CartTotals {
        debug!(product_id = %product.id, "adding product to cart");
        cart.add_to_cart(product.into())
    }

    fn current_query(&self) -> ListingQuery {
        if self.state.search_mode {
            ListingQuery::KeywordSearch {
                keyword: self.state.last_keyword_seen.clone(),
            }
        } else {
            ListingQuery::CategoryBrowse {
                category_id: self.state.current_category_id,
                category_name: self.state.current_category_name.clone(),
            }
        }
    }

    fn issue(&mut self, query: ListingQuery) -> IssuedQuery {
        self.last_seq += 1;
        let issued = IssuedQuery {
            seq: QuerySeq(self.last_seq),
            request: ListingRequest {
                query,
                page: PageRequest {
                    page_index: self.state.page_number.saturating_sub(1),
                    page_size: self.state.page_size,
                },
            },
        };
        debug!(seq = %issued.seq, request = ?issued.request, "issuing listing query");
        self.latest = Some(issued.clone());
        issued
    }

    fn is_latest(&self, seq: QuerySeq) -> bool {
        self.latest.as_ref().is_some_and(|latest| latest.seq == seq)
    }

    fn reject(&mut self, err: StorefrontError) -> StorefrontError {
        warn!(error = %err, "listing input rejected");
        self.failure = Some(err.report());
        err
    }
}

fn decide(params: &RouteParams) -> StorefrontResult<ListingQuery> {
    if let Some(keyword) = params.get(PARAM_KEYWORD) {
        return Ok(ListingQuery::KeywordSearch {
            keyword: keyword.to_string(),
        });
    }

    let Some(raw_id) = params.get(PARAM_ID) else {
        return Ok(ListingQuery::CategoryBrowse {
            category_id: DEFAULT_CATEGORY_ID,
            category_name: DEFAULT_CATEGORY_NAME.to_string(),
        });
    };

    let id = raw_id
        .parse::<i64>()
        .map_err(|source| StorefrontError::Parse {
            param: PARAM_ID,
            value: raw_id.to_string(),
            source,
        })?;
    Ok(ListingQuery::CategoryBrowse {
        category_id: CategoryId(id),
        category_name: params.get(PARAM_NAME).unwrap_or_default().to_string(),
    })
}

#[cfg(test)]
#[path = "tests/listing_tests.rs"]
mod tests;
