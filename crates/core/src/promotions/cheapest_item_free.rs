//! Cheapest Item Free
//!
//! Quantity-threshold promotion: once the cart holds enough units, the unit
//! price of the cheapest line item is given away ("buy 3, pay for 2").

use rust_decimal::Decimal;

use crate::{
    items::{LineItem, cheapest_item},
    pricing::PricingError,
};

/// Quantity-threshold promotion rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheapestItemFree {
    min_quantity: u64,
}

impl CheapestItemFree {
    /// Units required before the promotion applies, unless configured otherwise.
    pub const DEFAULT_MIN_QUANTITY: u64 = 3;

    /// Creates the rule with a custom unit threshold.
    pub const fn new(min_quantity: u64) -> Self {
        Self { min_quantity }
    }

    /// Units required before the promotion applies.
    pub const fn min_quantity(&self) -> u64 {
        self.min_quantity
    }

    /// Whether a cart holding `total_quantity` units qualifies.
    pub fn is_eligible(&self, total_quantity: u64) -> bool {
        // There must be at least one unit to give away.
        total_quantity >= self.min_quantity.max(1)
    }

    /// Candidate discount for the given items, `None` when ineligible.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::NoItems`] if the quantity is eligible but `items` is empty,
    /// which only happens when `total_quantity` does not describe `items`.
    pub fn discount(
        &self,
        items: &[LineItem],
        total_quantity: u64,
    ) -> Result<Option<Decimal>, PricingError> {
        if !self.is_eligible(total_quantity) {
            return Ok(None);
        }

        cheapest_item_price(items).map(Some)
    }
}

impl Default for CheapestItemFree {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_QUANTITY)
    }
}

/// Unit price of the cheapest line item.
///
/// # Errors
///
/// Returns [`PricingError::NoItems`] if `items` is empty. Callers should only ask
/// once the quantity threshold has been met, which guarantees at least one item.
pub fn cheapest_item_price(items: &[LineItem]) -> Result<Decimal, PricingError> {
    cheapest_item(items)
        .map(LineItem::unit_price)
        .ok_or(PricingError::NoItems)
}
