//! HAL-style envelopes returned by the catalog backend.
//!
//! List responses wrap their items as `{"_embedded": {"<key>": [...]}}` and
//! paginated ones add a `"page"` object. The embedded key differs per
//! resource, so each resource gets its own small wrapper type.

use serde::{Deserialize, Serialize};

use crate::{
    domain::{Country, OrderHistory, Product, ProductCategory, State},
    error::PageMetadataError,
};

pub trait Embedded {
    type Item;

    fn into_items(self) -> Vec<Self::Item>;
}

macro_rules! embedded_collection {
    ($name:ident, $key:literal, $field:ident, $item:ty) => {
        #[derive(Debug, Clone, Serialize, Deserialize)]
        pub struct $name {
            #[serde(rename = $key)]
            pub $field: Vec<$item>,
        }

        impl Embedded for $name {
            type Item = $item;

            fn into_items(self) -> Vec<$item> {
                self.$field
            }
        }
    };
}

embedded_collection!(EmbeddedProducts, "products", products, Product);
embedded_collection!(
    EmbeddedCategories,
    "productCategory",
    product_category,
    ProductCategory
);
embedded_collection!(EmbeddedCountries, "countries", countries, Country);
embedded_collection!(EmbeddedStates, "states", states, State);
embedded_collection!(EmbeddedOrders, "orders", orders, OrderHistory);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    /// Zero-based index of the page in this response.
    pub number: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnvelope<E> {
    #[serde(rename = "_embedded")]
    pub embedded: E,
}

impl<E: Embedded> ListEnvelope<E> {
    pub fn into_items(self) -> Vec<E::Item> {
        self.embedded.into_items()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedEnvelope<E> {
    #[serde(rename = "_embedded")]
    pub embedded: E,
    pub page: PageMetadata,
}

/// One page of results with a one-based page number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl<E: Embedded> TryFrom<PagedEnvelope<E>> for PageResult<E::Item> {
    type Error = PageMetadataError;

    fn try_from(envelope: PagedEnvelope<E>) -> Result<Self, Self::Error> {
        let page = envelope.page;
        if page.size == 0 {
            return Err(PageMetadataError::ZeroSize);
        }
        let page_number = page
            .number
            .checked_add(1)
            .ok_or(PageMetadataError::NumberOutOfRange(page.number))?;
        Ok(Self {
            items: envelope.embedded.into_items(),
            page_number,
            page_size: page.size,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
        })
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
