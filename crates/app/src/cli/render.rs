//! Table and JSON output.

use std::io;

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use tally::{
    cart::Cart,
    pricing::PricingError,
    products::Product,
    promotions::{AppliedDiscount, DiscountKind},
};
use thiserror::Error;

use crate::domain::carts::CartOutcome;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

fn round_amount(amount: Decimal, currency: &Currency) -> Decimal {
    amount.round_dp_with_strategy(currency.exponent, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount in `currency`, rounded half-up to its minor unit.
pub fn format_amount(amount: Decimal, currency: &Currency) -> String {
    Money::from_decimal(round_amount(amount, currency), currency).to_string()
}

/// Write the catalog as a table.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_products(
    out: &mut impl io::Write,
    products: &[Product],
    currency: &Currency,
) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Product", "Price"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            format_amount(product.price, currency),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::last(), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

/// Write the cart lines followed by its totals.
///
/// # Errors
///
/// Returns an error if a line total overflows or writing fails.
pub fn write_cart(
    out: &mut impl io::Write,
    cart: &Cart,
    currency: &Currency,
) -> Result<(), RenderError> {
    if cart.is_empty() {
        writeln!(out, "Cart is empty")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["ID", "Product", "Price", "Qty", "Line Total"]);

    for item in cart.items() {
        builder.push_record([
            item.product_id().to_string(),
            item.name().to_string(),
            format_amount(item.unit_price(), currency),
            item.quantity().to_string(),
            format_amount(item.line_total()?, currency),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..), Alignment::right());

    writeln!(out, "{table}")?;

    // Printed total is the printed subtotal minus the printed discount.
    let subtotal = round_amount(cart.subtotal(), currency);
    let discount_amount = round_amount(cart.discount(), currency);
    let total = subtotal
        .checked_sub(discount_amount)
        .ok_or(PricingError::Overflow)?;

    let discount = match cart.applied_discount() {
        AppliedDiscount::None => "none".to_string(),
        applied => format!(
            "-{} ({})",
            Money::from_decimal(discount_amount, currency),
            discount_label(applied.kind())
        ),
    };

    writeln!(out, " Subtotal: {}", Money::from_decimal(subtotal, currency))?;
    writeln!(out, " Discount: {discount}")?;
    writeln!(out, " Total:    {}", Money::from_decimal(total, currency))?;

    Ok(())
}

fn discount_label(kind: DiscountKind) -> &'static str {
    match kind {
        DiscountKind::None => "none",
        DiscountKind::CheapestItemFree => "cheapest item free",
        DiscountKind::PercentageOff => "VIP discount",
    }
}

#[derive(Debug, Serialize)]
struct Quote<'a> {
    outcomes: Vec<String>,
    cart: &'a Cart,
}

/// Write the outcomes and cart as pretty JSON. Amounts are unrounded.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn write_cart_json(
    out: &mut impl io::Write,
    outcomes: &[CartOutcome],
    cart: &Cart,
) -> Result<(), RenderError> {
    let quote = Quote {
        outcomes: outcomes.iter().map(ToString::to_string).collect(),
        cart,
    };

    serde_json::to_writer_pretty(&mut *out, &quote)?;
    writeln!(out)?;

    Ok(())
}
