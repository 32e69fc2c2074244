//! Pricing

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{discounts::DiscountError, items::LineItem};

/// Errors that can occur while pricing a set of line items.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// No items were provided where at least one is required.
    #[error("no items provided; cannot determine cheapest item price")]
    NoItems,

    /// Decimal arithmetic overflowed.
    #[error("price arithmetic overflowed")]
    Overflow,

    /// Wrapped discount calculation error.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// Calculates the sum of unit price times quantity across all line items.
///
/// An empty list has a subtotal of zero.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if any line total or the running sum overflows.
pub fn subtotal(items: &[LineItem]) -> Result<Decimal, PricingError> {
    items.iter().try_fold(Decimal::ZERO, |acc, item| {
        acc.checked_add(item.line_total()?)
            .ok_or(PricingError::Overflow)
    })
}

/// Total number of units across all line items.
pub fn total_quantity(items: &[LineItem]) -> u64 {
    items
        .iter()
        .map(|item| u64::from(item.quantity().get()))
        .sum()
}
