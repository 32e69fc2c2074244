//! Promotions
//!
//! Two independently computed candidate discounts, of which at most one is
//! applied to a cart:
//!
//! - [`CheapestItemFree`]: with at least three units in the cart, the cheapest
//!   unit is free.
//! - [`PercentageOff`]: preferred customers get 15% off the subtotal.
//!
//! [`PricingRules::select`] picks the larger. On a tie the cheapest-item-free
//! promotion is kept: the percentage promotion only wins when strictly larger.

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{items::LineItem, pricing::PricingError, tiers::CustomerTier};

pub mod cheapest_item_free;
pub mod percentage_off;

pub use cheapest_item_free::{CheapestItemFree, cheapest_item_price};
pub use percentage_off::{PercentageOff, percentage_off};

/// Which promotion, if any, produced a cart's discount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// No promotion applied
    #[default]
    None,

    /// Cheapest unit free
    CheapestItemFree,

    /// Tier percentage off
    PercentageOff,
}

impl Display for DiscountKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::None => f.write_str("none"),
            Self::CheapestItemFree => f.write_str("cheapest-item-free"),
            Self::PercentageOff => f.write_str("percentage-off"),
        }
    }
}

/// The selected promotion together with its value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum AppliedDiscount {
    /// No promotion applied
    #[default]
    None,

    /// Cheapest unit free, worth the given amount
    CheapestItemFree(Decimal),

    /// Tier percentage off, worth the given amount
    PercentageOff(Decimal),
}

impl AppliedDiscount {
    /// Which promotion was applied.
    pub const fn kind(&self) -> DiscountKind {
        match self {
            Self::None => DiscountKind::None,
            Self::CheapestItemFree(_) => DiscountKind::CheapestItemFree,
            Self::PercentageOff(_) => DiscountKind::PercentageOff,
        }
    }

    /// Amount taken off the subtotal.
    pub const fn amount(&self) -> Decimal {
        match self {
            Self::None => Decimal::ZERO,
            Self::CheapestItemFree(amount) | Self::PercentageOff(amount) => *amount,
        }
    }
}

/// The configured pair of promotion rules.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PricingRules {
    /// Quantity-threshold rule
    pub cheapest_item_free: CheapestItemFree,

    /// Tier rule
    pub percentage_off: PercentageOff,
}

impl PricingRules {
    /// Choose the best promotion for a set of items.
    ///
    /// `subtotal` and `total_quantity` must describe `items`.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a candidate cannot be calculated.
    pub fn select(
        &self,
        items: &[LineItem],
        subtotal: Decimal,
        total_quantity: u64,
        tier: CustomerTier,
    ) -> Result<AppliedDiscount, PricingError> {
        let mut applied = match self.cheapest_item_free.discount(items, total_quantity)? {
            Some(amount) if amount > Decimal::ZERO => AppliedDiscount::CheapestItemFree(amount),
            _ => AppliedDiscount::None,
        };

        if let Some(amount) = self.percentage_off.discount(subtotal, tier)?
            && amount > applied.amount()
        {
            applied = AppliedDiscount::PercentageOff(amount);
        }

        Ok(applied)
    }
}
