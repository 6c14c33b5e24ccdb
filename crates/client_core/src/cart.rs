use serde::Serialize;
use shared::domain::CartItem;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CartTotals {
    pub total_quantity: u32,
    pub total_price: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Merges by product id: an item already in the cart only gains quantity.
    pub fn add_to_cart(&mut self, item: CartItem) -> CartTotals {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => existing.quantity += item.quantity,
            None => self.items.push(item),
        }
        self.totals()
    }

    pub fn totals(&self) -> CartTotals {
        self.items
            .iter()
            .fold(CartTotals::default(), |totals, item| CartTotals {
                total_quantity: totals.total_quantity + item.quantity,
                total_price: totals.total_price + item.unit_price * f64::from(item.quantity),
            })
    }
}

#[cfg(test)]
#[path = "tests/cart_tests.rs"]
mod tests;
