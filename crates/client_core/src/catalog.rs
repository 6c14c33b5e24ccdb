//! HTTP access to the catalog, checkout and order endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    domain::{CategoryId, Country, OrderHistory, Product, ProductCategory, ProductId, State},
    protocol::{
        EmbeddedCategories, EmbeddedCountries, EmbeddedOrders, EmbeddedProducts, EmbeddedStates,
        ListEnvelope, PageResult, PagedEnvelope,
    },
};
use tracing::{debug, warn};
use url::Url;

use crate::{
    error::{StorefrontError, StorefrontResult},
    types::{ListingQuery, ListingRequest, PageRequest},
};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait]
pub trait CatalogQueries: Send + Sync {
    async fn list_paginate(
        &self,
        page_index: u32,
        page_size: u32,
        category_id: CategoryId,
    ) -> StorefrontResult<PageResult<Product>>;

    async fn search_paginate(
        &self,
        page_index: u32,
        page_size: u32,
        keyword: &str,
    ) -> StorefrontResult<PageResult<Product>>;

    async fn fetch(&self, request: &ListingRequest) -> StorefrontResult<PageResult<Product>> {
        let PageRequest {
            page_index,
            page_size,
        } = request.page;
        match &request.query {
            ListingQuery::CategoryBrowse { category_id, .. } => {
                self.list_paginate(page_index, page_size, *category_id).await
            }
            ListingQuery::KeywordSearch { keyword } => {
                self.search_paginate(page_index, page_size, keyword).await
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorefrontClient {
    http: Client,
    base_url: String,
}

impl StorefrontClient {
    pub fn new(base_url: &str) -> StorefrontResult<Self> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> StorefrontResult<Self> {
        let base_url = normalize_base_url(base_url)?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_product(&self, product_id: ProductId) -> StorefrontResult<Product> {
        self.get_json(&format!("/products/{product_id}"), &[]).await
    }

    pub async fn get_product_categories(&self) -> StorefrontResult<Vec<ProductCategory>> {
        let envelope: ListEnvelope<EmbeddedCategories> =
            self.get_json("/product-category", &[]).await?;
        Ok(envelope.into_items())
    }

    /// Unpaginated listing of a whole category.
    pub async fn get_product_list(&self, category_id: CategoryId) -> StorefrontResult<Vec<Product>> {
        let envelope: ListEnvelope<EmbeddedProducts> = self
            .get_json(
                "/products/search/findByCategoryId",
                &[("id", category_id.to_string())],
            )
            .await?;
        Ok(envelope.into_items())
    }

    pub async fn search_products(&self, keyword: &str) -> StorefrontResult<Vec<Product>> {
        let envelope: ListEnvelope<EmbeddedProducts> = self
            .get_json(
                "/products/search/findByNameContaining",
                &[("name", keyword.to_string())],
            )
            .await?;
        Ok(envelope.into_items())
    }

    pub async fn get_countries(&self) -> StorefrontResult<Vec<Country>> {
        let envelope: ListEnvelope<EmbeddedCountries> = self.get_json("/countries", &[]).await?;
        Ok(envelope.into_items())
    }

    pub async fn get_states(&self, country_code: &str) -> StorefrontResult<Vec<State>> {
        let envelope: ListEnvelope<EmbeddedStates> = self
            .get_json(
                "/states/search/findByCountryCode",
                &[("code", country_code.to_string())],
            )
            .await?;
        Ok(envelope.into_items())
    }

    /// Orders for a customer, newest first (sorted by the backend).
    pub async fn get_order_history(&self, email: &str) -> StorefrontResult<Vec<OrderHistory>> {
        let envelope: ListEnvelope<EmbeddedOrders> = self
            .get_json(
                "/orders/search/findByCustomerEmailOrderByDateCreatedDesc",
                &[("email", email.to_string())],
            )
            .await?;
        Ok(envelope.into_items())
    }

    async fn get_page(
        &self,
        path: &str,
        filter: (&str, String),
        page_index: u32,
        page_size: u32,
    ) -> StorefrontResult<PageResult<Product>> {
        let envelope: PagedEnvelope<EmbeddedProducts> = self
            .get_json(
                path,
                &[
                    filter,
                    ("page", page_index.to_string()),
                    ("size", page_size.to_string()),
                ],
            )
            .await?;
        if envelope.page.number != page_index {
            warn!(
                requested = page_index,
                returned = envelope.page.number,
                "catalog returned a different page than requested"
            );
        }
        PageResult::try_from(envelope)
            .map_err(|err| StorefrontError::Envelope(serde::de::Error::custom(err)))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> StorefrontResult<T> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, ?query, "catalog request");
        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(StorefrontError::Server {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CatalogQueries for StorefrontClient {
    async fn list_paginate(
        &self,
        page_index: u32,
        page_size: u32,
        category_id: CategoryId,
    ) -> StorefrontResult<PageResult<Product>> {
        self.get_page(
            "/products/search/findByCategoryId",
            ("id", category_id.to_string()),
            page_index,
            page_size,
        )
        .await
    }

    async fn search_paginate(
        &self,
        page_index: u32,
        page_size: u32,
        keyword: &str,
    ) -> StorefrontResult<PageResult<Product>> {
        self.get_page(
            "/products/search/findByNameContaining",
            ("name", keyword.to_string()),
            page_index,
            page_size,
        )
        .await
    }
}

pub fn normalize_base_url(raw: &str) -> StorefrontResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|err| StorefrontError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(StorefrontError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme `{}`", parsed.scheme()),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
