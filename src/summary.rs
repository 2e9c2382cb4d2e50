//! Cart Summary
//!
//! Renders a cart as a table of vehicles followed by the cart total.

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, LineItem},
    pricing::format_brl,
};

/// Errors that can occur when writing a cart summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Writing to the output failed.
    #[error("failed to write cart summary: {0}")]
    Io(#[from] io::Error),
}

/// Printable view of a cart.
#[derive(Debug, Clone, Copy)]
pub struct CartSummary<'a> {
    cart: &'a Cart,
}

impl<'a> CartSummary<'a> {
    /// Create a summary for the given cart.
    pub fn new(cart: &'a Cart) -> Self {
        Self { cart }
    }

    /// Write the summary table and total.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        if self.cart.is_empty() {
            writeln!(
                out,
                "No vehicles in the cart yet. Explore the showroom and pick your next car."
            )?;

            return Ok(());
        }

        let mut builder = Builder::default();

        push_header(&mut builder);

        for item in self.cart {
            push_item(&mut builder, item);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(
            1,
            HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
        );

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "\n{table}")?;
        writeln!(out, " Total: {}", format_brl(self.cart.total_cents()))?;

        Ok(())
    }
}

fn push_header(builder: &mut Builder) {
    builder.push_record(["Vehicle", "Type", "Unit Price", "Qty", "Line Total"]);
}

fn push_item(builder: &mut Builder, item: &LineItem) {
    let product = item.product();

    builder.push_record([
        format!(
            "{} {} ({})",
            product.brand, product.model_name, product.year
        ),
        product.kind.clone(),
        format_brl(product.value),
        item.quantity().to_string(),
        format_brl(item.total_cents()),
    ]);
}
