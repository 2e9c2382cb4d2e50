//! Cart
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s holding at most one line per
//! resolved [`ProductKey`], each with a quantity of at least one. Carts change
//! only through [`Cart::apply`], which consumes the cart and hands back the next
//! one along with the events the change produced. [`CartStore`] owns the current
//! cart and forwards those events to a notification sink and its subscribers.

use std::slice;

use rusty_money::{Money, iso::Currency};

use crate::{
    pricing::{brl, total_cents},
    products::{Product, ProductKey, resolve_key},
};

pub mod events;
pub mod store;
pub mod transitions;

pub use events::{CartEvent, CartEventKind};
pub use store::{CartObserver, CartStore, SharedCartStore, SubscriptionKey};
pub use transitions::{CartCommand, Transition};

/// One product in the cart and how many of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    key: ProductKey,
    product: Product,
    quantity: u32,
}

impl LineItem {
    pub(crate) fn new(product: Product, quantity: u32) -> Self {
        Self {
            key: resolve_key(&product),
            product,
            quantity,
        }
    }

    /// Resolved key of the product on this line.
    pub fn key(&self) -> &ProductKey {
        &self.key
    }

    /// Product on this line.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Quantity, always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Line total in centavos.
    pub fn total_cents(&self) -> i64 {
        crate::pricing::line_total_cents(self)
    }

    /// Whether `key` names this line, either as its resolved key or as the raw
    /// product id.
    pub fn matches(&self, key: &str) -> bool {
        self.key == *key || self.product.id.as_deref() == Some(key)
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}

/// Shopping cart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities over all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Iterate over lines in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// First line matching `key` by resolved key or raw product id.
    pub fn get(&self, key: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.matches(key))
    }

    /// Total value of the cart in centavos.
    pub fn total_cents(&self) -> i64 {
        total_cents(&self.items)
    }

    /// Total value of the cart in reais.
    pub fn total(&self) -> Money<'static, Currency> {
        brl(self.total_cents())
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart_with(products: impl IntoIterator<Item = (Product, u32)>) -> Cart {
        products.into_iter().fold(Cart::new(), |cart, (product, qty)| {
            cart.apply(CartCommand::add(product, qty)).cart
        })
    }

    #[test]
    fn new_cart_is_empty() {
        let cart = Cart::new();

        assert!(cart.is_empty());
        assert_eq!(cart.len(), 0);
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total_cents(), 0);
    }

    #[test]
    fn item_count_sums_quantities() {
        let cart = cart_with([
            (Product::new("Fiat", "Uno", 2020, 100), 2),
            (Product::new("Ford", "Ka", 2018, 100), 5),
        ]);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.item_count(), 7);
    }

    #[test]
    fn get_finds_by_resolved_key_and_raw_id() {
        let cart = cart_with([
            (Product::new("Fiat", "Uno", 2020, 100).with_id("uno-1"), 1),
            (Product::new("Ford", "Ka", 2018, 200), 1),
        ]);

        assert!(cart.get("uno-1").is_some());
        assert!(cart.get("Ford-Ka-2018-200").is_some());
        assert!(cart.get("missing").is_none());
    }

    #[test]
    fn raw_blank_id_still_matches_itself() {
        let cart = cart_with([(Product::new("Fiat", "Uno", 2020, 100).with_id(" "), 1)]);

        let item = cart.get(" ");

        assert!(item.is_some_and(|item| item.key() == "Fiat-Uno-2020-100"));
    }

    #[test]
    fn total_in_reais() {
        let cart = cart_with([(Product::new("Fiat", "Uno", 2020, 3_000_000), 2)]);

        assert_eq!(cart.total(), brl(6_000_000));
    }

    #[test]
    fn iterates_in_insertion_order() {
        let cart = cart_with([
            (Product::new("Ford", "Ka", 2018, 1), 1),
            (Product::new("Fiat", "Uno", 2020, 1), 1),
        ]);

        let brands: Vec<&str> = (&cart)
            .into_iter()
            .map(|item| item.product().brand.as_str())
            .collect();

        assert_eq!(brands, ["Ford", "Fiat"]);
    }
}
