//! Tally prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        Cart, CartError, UpdateDirection, add_item, remove_item, set_item_quantity,
        update_item_quantity,
    },
    catalog::{Catalog, CatalogError},
    discounts::DiscountError,
    engine::PricingEngine,
    fixtures::FixtureError,
    items::LineItem,
    pricing::PricingError,
    products::{Product, ProductId},
    promotions::{AppliedDiscount, CheapestItemFree, DiscountKind, PercentageOff, PricingRules},
    tiers::CustomerTier,
    totals::{Totals, compute_totals},
};
