use super::*;
use shared::domain::ProductId;

fn item(id: i64, unit_price: f64) -> CartItem {
    CartItem {
        id: ProductId(id),
        name: format!("item {id}"),
        image_url: String::new(),
        unit_price,
        quantity: 1,
    }
}

#[test]
fn empty_cart_has_zero_totals() {
    let cart = Cart::new();
    assert!(cart.is_empty());
    assert_eq!(cart.totals(), CartTotals::default());
}

#[test]
fn adding_same_product_increments_quantity() {
    let mut cart = Cart::new();
    cart.add_to_cart(item(1, 19.99));
    let totals = cart.add_to_cart(item(1, 19.99));

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 2);
    assert_eq!(totals.total_quantity, 2);
    assert!((totals.total_price - 39.98).abs() < 1e-9);
}

#[test]
fn distinct_products_are_kept_in_insertion_order() {
    let mut cart = Cart::new();
    cart.add_to_cart(item(2, 5.0));
    cart.add_to_cart(item(1, 1.5));
    let totals = cart.add_to_cart(item(2, 5.0));

    let ids: Vec<ProductId> = cart.items().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![ProductId(2), ProductId(1)]);
    assert_eq!(totals.total_quantity, 3);
    assert!((totals.total_price - 11.5).abs() < 1e-9);
}
