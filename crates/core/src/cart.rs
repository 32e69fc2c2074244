//! Cart
//!
//! An immutable snapshot of line items together with their derived totals.
//! Carts are only ever produced by a [`PricingEngine`], which recalculates every
//! derived field from the item list, so items and totals cannot drift apart.

use rust_decimal::Decimal;
use serde::Serialize;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    engine::PricingEngine,
    items::LineItem,
    pricing::PricingError,
    products::{Product, ProductId},
    promotions::{AppliedDiscount, DiscountKind},
    tiers::CustomerTier,
    totals::Totals,
};

/// Inline storage for a typical cart's lines.
pub(crate) type LineItems = SmallVec<[LineItem; 4]>;

/// Errors related to cart construction or mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A line item was given a negative unit price.
    #[error("product {0} has a negative unit price")]
    NegativePrice(ProductId),

    /// The same product appeared on more than one line.
    #[error("product {0} appears on more than one line")]
    DuplicateProduct(ProductId),

    /// Incrementing a quantity overflowed.
    #[error("quantity for product {0} is out of range")]
    QuantityOverflow(ProductId),

    /// Totals could not be calculated.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Direction of a single-step quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateDirection {
    /// Add one unit
    Increase,

    /// Remove one unit, dropping the line at zero
    Decrease,
}

/// Cart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    pub(crate) items: LineItems,

    #[serde(flatten)]
    pub(crate) totals: Totals,
}

impl Cart {
    /// The canonical empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Line items in first-added order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Line item for `product_id`, if present.
    pub fn item(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items
            .iter()
            .find(|item| item.product_id() == product_id)
    }

    /// Whether a line item for `product_id` is present.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.item(product_id).is_some()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All derived totals.
    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    /// Sum of unit price times quantity.
    pub fn subtotal(&self) -> Decimal {
        self.totals.subtotal()
    }

    /// Amount taken off the subtotal.
    pub fn discount(&self) -> Decimal {
        self.totals.discount_amount()
    }

    /// The selected promotion and its value.
    pub fn applied_discount(&self) -> AppliedDiscount {
        self.totals.discount()
    }

    /// Which promotion produced the discount.
    pub fn discount_kind(&self) -> DiscountKind {
        self.totals.discount_kind()
    }

    /// Amount payable.
    pub fn total(&self) -> Decimal {
        self.totals.total()
    }

    /// Number of units across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.totals.total_quantity()
    }
}

/// Add one unit of `product` using the default promotion rules.
///
/// An absent cart is treated as empty.
///
/// # Errors
///
/// See [`PricingEngine::add_item`].
pub fn add_item(
    cart: Option<&Cart>,
    product: &Product,
    tier: CustomerTier,
) -> Result<Cart, CartError> {
    PricingEngine::default().add_item(cart, product, tier)
}

/// Step the quantity of `product_id` using the default promotion rules.
///
/// An absent cart is treated as empty.
///
/// # Errors
///
/// See [`PricingEngine::update_item_quantity`].
pub fn update_item_quantity(
    cart: Option<&Cart>,
    product_id: ProductId,
    direction: UpdateDirection,
    tier: CustomerTier,
) -> Result<Cart, CartError> {
    PricingEngine::default().update_item_quantity(cart, product_id, direction, tier)
}

/// Remove the line for `product_id` using the default promotion rules.
///
/// An absent cart is treated as empty.
///
/// # Errors
///
/// See [`PricingEngine::remove_item`].
pub fn remove_item(
    cart: Option<&Cart>,
    product_id: ProductId,
    tier: CustomerTier,
) -> Result<Cart, CartError> {
    PricingEngine::default().remove_item(cart, product_id, tier)
}

/// Set the absolute quantity of `product_id` using the default promotion rules.
///
/// An absent cart is treated as empty.
///
/// # Errors
///
/// See [`PricingEngine::set_item_quantity`].
pub fn set_item_quantity(
    cart: Option<&Cart>,
    product_id: ProductId,
    quantity: i64,
    tier: CustomerTier,
) -> Result<Cart, CartError> {
    PricingEngine::default().set_item_quantity(cart, product_id, quantity, tier)
}
