//! Totals

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    items::LineItem,
    pricing::{self, PricingError},
    promotions::{AppliedDiscount, DiscountKind, PricingRules},
    tiers::CustomerTier,
};

/// Derived totals of a set of line items.
///
/// `total` is always `subtotal` minus the applied discount amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    subtotal: Decimal,
    discount: AppliedDiscount,
    total: Decimal,
    total_quantity: u64,
}

impl Totals {
    /// Calculate totals for `items` under `rules`.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if decimal arithmetic overflows.
    pub fn calculate(
        items: &[LineItem],
        tier: CustomerTier,
        rules: &PricingRules,
    ) -> Result<Self, PricingError> {
        let total_quantity = pricing::total_quantity(items);
        let subtotal = pricing::subtotal(items)?;
        let discount = rules.select(items, subtotal, total_quantity, tier)?;

        let total = subtotal
            .checked_sub(discount.amount())
            .ok_or(PricingError::Overflow)?;

        Ok(Self {
            subtotal,
            discount,
            total,
            total_quantity,
        })
    }

    /// Sum of unit price times quantity
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// The selected promotion and its value
    pub fn discount(&self) -> AppliedDiscount {
        self.discount
    }

    /// Amount taken off the subtotal
    pub fn discount_amount(&self) -> Decimal {
        self.discount.amount()
    }

    /// Which promotion produced the discount
    pub fn discount_kind(&self) -> DiscountKind {
        self.discount.kind()
    }

    /// Amount payable
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Number of units
    pub fn total_quantity(&self) -> u64 {
        self.total_quantity
    }
}

/// Calculate totals for `items` with the default promotion rules.
///
/// # Errors
///
/// Returns a [`PricingError`] if decimal arithmetic overflows.
pub fn compute_totals(items: &[LineItem], tier: CustomerTier) -> Result<Totals, PricingError> {
    Totals::calculate(items, tier, &PricingRules::default())
}
