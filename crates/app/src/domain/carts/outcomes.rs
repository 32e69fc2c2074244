//! Cart Outcomes

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;
use tally::{cart::Cart, tiers::CustomerTier};

/// What a cart operation did. Lookups that miss are reported here rather than
/// as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CartOutcome {
    ProductAdded,
    ProductNotFound,
    ItemNotFound,
    ItemRemoved,
    QuantityUpdated,
    TierUpdated(CustomerTier),
}

impl CartOutcome {
    /// Whether the operation changed the cart or tier.
    pub const fn is_applied(self) -> bool {
        !matches!(self, Self::ProductNotFound | Self::ItemNotFound)
    }
}

impl Display for CartOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::ProductAdded => f.write_str("Product added to cart"),
            Self::ProductNotFound => f.write_str("Product not found"),
            Self::ItemNotFound => f.write_str("Item not found"),
            Self::ItemRemoved => f.write_str("Product removed from cart"),
            Self::QuantityUpdated => f.write_str("Item quantity updated"),
            Self::TierUpdated(tier) => write!(f, "User tier updated to {tier}"),
        }
    }
}

/// Outcome of an operation and the session's cart afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartUpdate {
    pub outcome: CartOutcome,
    pub cart: Cart,
}
