//! Pricing
//!
//! Listing values are integer centavos. Totals stay in integer arithmetic and
//! saturate instead of overflowing, so reading a total can never fail.

use rusty_money::{
    Money,
    iso::{self, Currency},
};

use crate::cart::LineItem;

/// Wrap a centavo amount as reais.
pub fn brl(cents: i64) -> Money<'static, Currency> {
    Money::from_minor(cents, iso::BRL)
}

/// Format a centavo amount for display, e.g. `R$30.000,00`.
pub fn format_brl(cents: i64) -> String {
    brl(cents).to_string()
}

/// Unit value multiplied by quantity.
pub fn line_total_cents(item: &LineItem) -> i64 {
    item.product()
        .value
        .saturating_mul(i64::from(item.quantity()))
}

/// Sum of line totals, zero for no items.
pub fn total_cents<'a>(items: impl IntoIterator<Item = &'a LineItem>) -> i64 {
    items
        .into_iter()
        .map(line_total_cents)
        .fold(0, i64::saturating_add)
}
