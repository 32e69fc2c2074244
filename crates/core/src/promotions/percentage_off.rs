//! Percentage Off
//!
//! Tier promotion: preferred customers get a fixed percentage off the subtotal.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;

use crate::{
    discounts::{DiscountError, percent_of},
    pricing::PricingError,
    tiers::CustomerTier,
};

/// Tier-based percentage promotion rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentageOff {
    rate: Percentage,
}

impl PercentageOff {
    /// Creates the rule with a custom rate.
    pub fn new(rate: Percentage) -> Self {
        Self { rate }
    }

    /// The configured rate.
    pub fn rate(&self) -> Percentage {
        self.rate
    }

    /// Whether `tier` qualifies.
    pub fn is_eligible(&self, tier: CustomerTier) -> bool {
        tier.is_preferred()
    }

    /// Rate applied to `subtotal`, regardless of tier.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::PercentConversion`] if the multiplication overflows.
    pub fn amount(&self, subtotal: Decimal) -> Result<Decimal, DiscountError> {
        percent_of(&self.rate, subtotal)
    }

    /// Candidate discount, `None` when `tier` is not eligible.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Discount`] if the multiplication overflows.
    pub fn discount(
        &self,
        subtotal: Decimal,
        tier: CustomerTier,
    ) -> Result<Option<Decimal>, PricingError> {
        if !self.is_eligible(tier) {
            return Ok(None);
        }

        Ok(Some(self.amount(subtotal)?))
    }
}

impl Default for PercentageOff {
    /// 15% off.
    fn default() -> Self {
        Self::new(Percentage::from(Decimal::new(15, 2)))
    }
}

/// The default tier discount for `subtotal`: 15%, unrounded and unclamped.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the multiplication overflows.
pub fn percentage_off(subtotal: Decimal) -> Result<Decimal, DiscountError> {
    PercentageOff::default().amount(subtotal)
}
