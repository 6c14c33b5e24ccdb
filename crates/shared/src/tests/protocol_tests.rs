use super::*;
use crate::{
    domain::{CategoryId, ProductId},
    error::PageMetadataError,
};

const PRODUCT_PAGE: &str = r#"{
  "_embedded": {
    "products": [
      {
        "id": 12,
        "sku": "BOOK-TECH-1012",
        "name": "Crash Course in Rust",
        "description": "Learn Rust",
        "unitPrice": 14.99,
        "imageUrl": "assets/images/products/books/book-1012.png",
        "active": true,
        "unitsInStock": 100,
        "dateCreated": "2024-03-01T10:15:30.000+00:00",
        "lastUpdated": null
      },
      { "id": 13, "name": "Become a Guru in Rust", "unitPrice": 20.5 }
    ]
  },
  "page": { "size": 5, "totalElements": 23, "totalPages": 5, "number": 2 }
}"#;

#[test]
fn paged_envelope_converts_to_one_based_page_result() {
    let envelope: PagedEnvelope<EmbeddedProducts> =
        serde_json::from_str(PRODUCT_PAGE).expect("decode");
    let page = PageResult::try_from(envelope).expect("valid page");

    assert_eq!(page.page_number, 3);
    assert_eq!(page.page_size, 5);
    assert_eq!(page.total_elements, 23);
    assert_eq!(page.total_pages, 5);
    let ids: Vec<ProductId> = page.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![ProductId(12), ProductId(13)]);
}

#[test]
fn missing_product_fields_fall_back_to_defaults() {
    let envelope: PagedEnvelope<EmbeddedProducts> =
        serde_json::from_str(PRODUCT_PAGE).expect("decode");
    let sparse = &envelope.embedded.products[1];
    assert!(sparse.active);
    assert_eq!(sparse.units_in_stock, 0);
    assert!(sparse.sku.is_empty());
    assert!(sparse.date_created.is_none());
}

#[test]
fn paged_envelope_requires_page_block() {
    let raw = r#"{"_embedded": {"products": []}}"#;
    let err = serde_json::from_str::<PagedEnvelope<EmbeddedProducts>>(raw)
        .expect_err("page block is mandatory");
    assert!(err.to_string().contains("page"));
}

#[test]
fn list_envelope_requires_embedded_block() {
    let raw = r#"{"countries": []}"#;
    let err = serde_json::from_str::<ListEnvelope<EmbeddedCountries>>(raw)
        .expect_err("_embedded is mandatory");
    assert!(err.to_string().contains("_embedded"));
}

#[test]
fn category_envelope_uses_singular_key() {
    let raw = r#"{"_embedded": {"productCategory": [
        {"id": 1, "categoryName": "Books"},
        {"id": 2, "categoryName": "Coffee Mugs"}
    ]}}"#;
    let categories = serde_json::from_str::<ListEnvelope<EmbeddedCategories>>(raw)
        .expect("decode")
        .into_items();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[1].id, CategoryId(2));
    assert_eq!(categories[1].category_name, "Coffee Mugs");
}

fn empty_page(page_block: &str) -> PagedEnvelope<EmbeddedProducts> {
    let raw = format!(r#"{{"_embedded": {{"products": []}}, "page": {page_block}}}"#);
    serde_json::from_str(&raw).expect("decode")
}

#[test]
fn last_representable_page_index_is_rejected_not_overflowed() {
    let envelope = empty_page(
        r#"{"size": 5, "totalElements": 0, "totalPages": 0, "number": 4294967295}"#,
    );
    let err = PageResult::try_from(envelope).expect_err("no one-based page number");
    assert_eq!(err, PageMetadataError::NumberOutOfRange(u32::MAX));
}

#[test]
fn zero_page_size_is_rejected() {
    let envelope =
        empty_page(r#"{"size": 0, "totalElements": 0, "totalPages": 0, "number": 0}"#);
    let err = PageResult::try_from(envelope).expect_err("size must be positive");
    assert_eq!(err, PageMetadataError::ZeroSize);
}
