//! Line items

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    cart::CartError,
    pricing::PricingError,
    products::{Product, ProductId},
};

/// A cart line: one product, its unit price, and a quantity of at least one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    product_id: ProductId,
    name: String,
    image: Option<String>,
    unit_price: Decimal,
    quantity: NonZeroU32,
}

impl LineItem {
    /// Creates a new line item.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NegativePrice`] if `unit_price` is below zero.
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: NonZeroU32,
    ) -> Result<Self, CartError> {
        let product_id = product_id.into();

        if unit_price < Decimal::ZERO {
            return Err(CartError::NegativePrice(product_id));
        }

        Ok(Self {
            product_id,
            name: name.into(),
            image: None,
            unit_price,
            quantity,
        })
    }

    /// Creates a line item for a single unit of `product`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NegativePrice`] if the product price is below zero.
    pub fn from_product(product: &Product) -> Result<Self, CartError> {
        let item = Self::new(product.id, product.name.clone(), product.price, NonZeroU32::MIN)?;

        Ok(Self {
            image: product.image.clone(),
            ..item
        })
    }

    /// Product this line refers to
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Product image
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Price of a single unit
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Number of units
    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    pub(crate) fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }

    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the multiplication overflows.
    pub fn line_total(&self) -> Result<Decimal, PricingError> {
        self.unit_price
            .checked_mul(Decimal::from(self.quantity.get()))
            .ok_or(PricingError::Overflow)
    }
}

/// Returns the line item with the lowest unit price, or `None` if `items` is empty.
///
/// Ties resolve to the first matching item.
pub fn cheapest_item(items: &[LineItem]) -> Option<&LineItem> {
    items.iter().min_by_key(|item| item.unit_price())
}
