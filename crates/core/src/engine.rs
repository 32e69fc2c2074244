//! Pricing engine
//!
//! Pure cart transformations. Each operation copies the input cart's items,
//! applies one change, and recalculates every total from scratch. The input
//! cart is never modified, so earlier snapshots held by other callers stay
//! valid. Callers applying several changes must feed each result into the next
//! call; concurrent changes against the same snapshot are not merged.

use std::num::NonZeroU32;

use rustc_hash::FxHashSet;

use crate::{
    cart::{Cart, CartError, LineItems, UpdateDirection},
    items::LineItem,
    pricing::PricingError,
    products::{Product, ProductId},
    promotions::PricingRules,
    tiers::CustomerTier,
    totals::Totals,
};

/// Applies cart mutations under a fixed set of promotion rules.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PricingEngine {
    rules: PricingRules,
}

impl PricingEngine {
    /// Create an engine with the given rules.
    pub fn new(rules: PricingRules) -> Self {
        Self { rules }
    }

    /// Calculate totals for `items`.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if decimal arithmetic overflows.
    pub fn compute_totals(
        &self,
        items: &[LineItem],
        tier: CustomerTier,
    ) -> Result<Totals, PricingError> {
        Totals::calculate(items, tier, &self.rules)
    }

    /// Build a priced cart from existing line items, keeping their order.
    ///
    /// # Errors
    ///
    /// - [`CartError::DuplicateProduct`]: two lines refer to the same product.
    /// - [`CartError::Pricing`]: totals could not be calculated.
    pub fn cart_from_items(
        &self,
        items: impl IntoIterator<Item = LineItem>,
        tier: CustomerTier,
    ) -> Result<Cart, CartError> {
        let items: LineItems = items.into_iter().collect();
        let mut seen = FxHashSet::default();

        for item in &items {
            if !seen.insert(item.product_id()) {
                return Err(CartError::DuplicateProduct(item.product_id()));
            }
        }

        self.price(items, tier)
    }

    /// Add one unit of `product`.
    ///
    /// An existing line for the product is incremented; otherwise a new line with
    /// quantity one is appended.
    ///
    /// # Errors
    ///
    /// - [`CartError::NegativePrice`]: the product has a negative price.
    /// - [`CartError::QuantityOverflow`]: the existing quantity cannot be incremented.
    /// - [`CartError::Pricing`]: totals could not be calculated.
    pub fn add_item(
        &self,
        cart: Option<&Cart>,
        product: &Product,
        tier: CustomerTier,
    ) -> Result<Cart, CartError> {
        let mut items = items_of(cart);

        match quantity_of(&items, product.id) {
            Some(current) => {
                let quantity = increment(product.id, current)?;
                set_quantity(&mut items, product.id, Some(quantity));
            }
            None => items.push(LineItem::from_product(product)?),
        }

        self.price(items, tier)
    }

    /// Step the quantity of `product_id` up or down by one.
    ///
    /// Decreasing a line with quantity one removes it. An unknown product leaves
    /// the items unchanged.
    ///
    /// # Errors
    ///
    /// - [`CartError::QuantityOverflow`]: the quantity cannot be incremented.
    /// - [`CartError::Pricing`]: totals could not be calculated.
    pub fn update_item_quantity(
        &self,
        cart: Option<&Cart>,
        product_id: ProductId,
        direction: UpdateDirection,
        tier: CustomerTier,
    ) -> Result<Cart, CartError> {
        let mut items = items_of(cart);

        let Some(current) = quantity_of(&items, product_id) else {
            return self.price(items, tier);
        };

        let next = match direction {
            UpdateDirection::Increase => Some(increment(product_id, current)?),
            UpdateDirection::Decrease => NonZeroU32::new(current.get() - 1),
        };

        set_quantity(&mut items, product_id, next);

        self.price(items, tier)
    }

    /// Set the quantity of `product_id` to an absolute value.
    ///
    /// A quantity of zero or below removes the line. An unknown product leaves the
    /// items unchanged.
    ///
    /// # Errors
    ///
    /// - [`CartError::QuantityOverflow`]: `quantity` does not fit a line quantity.
    /// - [`CartError::Pricing`]: totals could not be calculated.
    pub fn set_item_quantity(
        &self,
        cart: Option<&Cart>,
        product_id: ProductId,
        quantity: i64,
        tier: CustomerTier,
    ) -> Result<Cart, CartError> {
        if quantity <= 0 {
            return self.remove_item(cart, product_id, tier);
        }

        let mut items = items_of(cart);

        if quantity_of(&items, product_id).is_some() {
            let quantity = u32::try_from(quantity)
                .ok()
                .and_then(NonZeroU32::new)
                .ok_or(CartError::QuantityOverflow(product_id))?;

            set_quantity(&mut items, product_id, Some(quantity));
        }

        self.price(items, tier)
    }

    /// Remove the line for `product_id`, if present.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Pricing`] if totals could not be calculated.
    pub fn remove_item(
        &self,
        cart: Option<&Cart>,
        product_id: ProductId,
        tier: CustomerTier,
    ) -> Result<Cart, CartError> {
        let mut items = items_of(cart);

        items.retain(|item| item.product_id() != product_id);

        self.price(items, tier)
    }

    /// Recalculate an unchanged cart, e.g. after the customer's tier changed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Pricing`] if totals could not be calculated.
    pub fn reprice(&self, cart: Option<&Cart>, tier: CustomerTier) -> Result<Cart, CartError> {
        self.price(items_of(cart), tier)
    }

    fn price(&self, items: LineItems, tier: CustomerTier) -> Result<Cart, CartError> {
        let totals = self.compute_totals(&items, tier)?;

        Ok(Cart { items, totals })
    }
}

fn items_of(cart: Option<&Cart>) -> LineItems {
    cart.map(|cart| cart.items.clone()).unwrap_or_default()
}

fn quantity_of(items: &[LineItem], product_id: ProductId) -> Option<NonZeroU32> {
    items
        .iter()
        .find(|item| item.product_id() == product_id)
        .map(LineItem::quantity)
}

/// Sets the quantity of a line, or drops the line when `quantity` is `None`.
fn set_quantity(items: &mut LineItems, product_id: ProductId, quantity: Option<NonZeroU32>) {
    match quantity {
        Some(quantity) => {
            if let Some(item) = items
                .iter_mut()
                .find(|item| item.product_id() == product_id)
            {
                item.set_quantity(quantity);
            }
        }
        None => items.retain(|item| item.product_id() != product_id),
    }
}

fn increment(product_id: ProductId, quantity: NonZeroU32) -> Result<NonZeroU32, CartError> {
    quantity
        .checked_add(1)
        .ok_or(CartError::QuantityOverflow(product_id))
}

#[cfg(test)]
mod tests {
    use decimal_percentage::Percentage;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::promotions::{DiscountKind, PercentageOff};

    use super::*;

    fn t_shirt() -> Product {
        Product::new(1, "T-shirt", Decimal::new(35_99, 2)).with_image("t-shirt.jpg")
    }

    fn jeans() -> Product {
        Product::new(2, "Jeans", Decimal::new(65_50, 2))
    }

    fn dress() -> Product {
        Product::new(3, "Dress", Decimal::new(80_75, 2))
    }

    fn add_times(
        engine: &PricingEngine,
        cart: Cart,
        product: &Product,
        times: usize,
        tier: CustomerTier,
    ) -> Result<Cart, CartError> {
        (0..times).try_fold(cart, |cart, _| engine.add_item(Some(&cart), product, tier))
    }

    #[test]
    fn add_new_product_appends_line_with_quantity_one() -> TestResult {
        let engine = PricingEngine::default();

        let cart = engine.add_item(None, &t_shirt(), CustomerTier::Standard)?;
        let cart = engine.add_item(Some(&cart), &jeans(), CustomerTier::Standard)?;

        let ids: Vec<_> = cart.items().iter().map(LineItem::product_id).collect();

        assert_eq!(ids, [ProductId::new(1), ProductId::new(2)]);
        assert_eq!(cart.item(ProductId::new(1)).map(LineItem::image), Some(Some("t-shirt.jpg")));

        Ok(())
    }

    #[test]
    fn add_existing_product_increments_quantity() -> TestResult {
        let engine = PricingEngine::default();

        let cart = add_times(&engine, Cart::new(), &t_shirt(), 3, CustomerTier::Standard)?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.discount_kind(), DiscountKind::CheapestItemFree);

        Ok(())
    }

    #[test]
    fn add_negative_priced_product_is_rejected() {
        let engine = PricingEngine::default();
        let broken = Product::new(9, "Broken", Decimal::new(-1, 0));

        let result = engine.add_item(None, &broken, CustomerTier::Standard);

        assert_eq!(result, Err(CartError::NegativePrice(ProductId::new(9))));
    }

    #[test]
    fn add_to_saturated_quantity_overflows() -> TestResult {
        let engine = PricingEngine::default();
        let product = t_shirt();
        let cart = engine.add_item(None, &product, CustomerTier::Standard)?;
        let cart = engine.set_item_quantity(
            Some(&cart),
            product.id,
            i64::from(u32::MAX),
            CustomerTier::Standard,
        )?;

        let result = engine.add_item(Some(&cart), &product, CustomerTier::Standard);

        assert_eq!(result, Err(CartError::QuantityOverflow(product.id)));

        Ok(())
    }

    #[test]
    fn decrease_to_zero_removes_line() -> TestResult {
        let engine = PricingEngine::default();
        let cart = engine.add_item(None, &t_shirt(), CustomerTier::Standard)?;
        let cart = add_times(&engine, cart, &jeans(), 2, CustomerTier::Standard)?;

        let cart = engine.update_item_quantity(
            Some(&cart),
            ProductId::new(1),
            UpdateDirection::Decrease,
            CustomerTier::Standard,
        )?;

        assert!(!cart.contains(ProductId::new(1)));
        assert_eq!(cart.subtotal(), Decimal::new(131_00, 2));
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.discount_kind(), DiscountKind::None);

        Ok(())
    }

    #[test]
    fn decrease_above_one_keeps_line() -> TestResult {
        let engine = PricingEngine::default();
        let cart = add_times(&engine, Cart::new(), &jeans(), 2, CustomerTier::Standard)?;

        let cart = engine.update_item_quantity(
            Some(&cart),
            ProductId::new(2),
            UpdateDirection::Decrease,
            CustomerTier::Standard,
        )?;

        assert_eq!(cart.item(ProductId::new(2)).map(|item| item.quantity().get()), Some(1));

        Ok(())
    }

    #[test]
    fn update_unknown_product_is_a_no_op() -> TestResult {
        let engine = PricingEngine::default();
        let cart = add_times(&engine, Cart::new(), &dress(), 2, CustomerTier::Preferred)?;

        for direction in [UpdateDirection::Increase, UpdateDirection::Decrease] {
            let updated = engine.update_item_quantity(
                Some(&cart),
                ProductId::new(99),
                direction,
                CustomerTier::Preferred,
            )?;

            assert_eq!(updated, cart);
        }

        Ok(())
    }

    #[test]
    fn remove_unknown_product_is_a_no_op() -> TestResult {
        let engine = PricingEngine::default();
        let cart = engine.add_item(None, &dress(), CustomerTier::Standard)?;

        let updated = engine.remove_item(Some(&cart), ProductId::new(99), CustomerTier::Standard)?;

        assert_eq!(updated, cart);

        Ok(())
    }

    #[test]
    fn remove_on_absent_cart_gives_empty_cart() -> TestResult {
        let cart =
            PricingEngine::default().remove_item(None, ProductId::new(1), CustomerTier::Standard)?;

        assert_eq!(cart, Cart::new());

        Ok(())
    }

    #[test]
    fn set_quantity_zero_or_below_removes_line() -> TestResult {
        let engine = PricingEngine::default();
        let cart = engine.add_item(None, &dress(), CustomerTier::Standard)?;

        for quantity in [0, -3] {
            let updated = engine.set_item_quantity(
                Some(&cart),
                ProductId::new(3),
                quantity,
                CustomerTier::Standard,
            )?;

            assert!(updated.is_empty());
        }

        Ok(())
    }

    #[test]
    fn set_quantity_out_of_range_is_rejected() -> TestResult {
        let engine = PricingEngine::default();
        let cart = engine.add_item(None, &dress(), CustomerTier::Standard)?;

        let result = engine.set_item_quantity(
            Some(&cart),
            ProductId::new(3),
            i64::from(u32::MAX) + 1,
            CustomerTier::Standard,
        );

        assert_eq!(result, Err(CartError::QuantityOverflow(ProductId::new(3))));

        Ok(())
    }

    #[test]
    fn set_quantity_on_unknown_product_is_a_no_op() -> TestResult {
        let engine = PricingEngine::default();
        let cart = engine.add_item(None, &dress(), CustomerTier::Standard)?;

        let updated =
            engine.set_item_quantity(Some(&cart), ProductId::new(7), 4, CustomerTier::Standard)?;

        assert_eq!(updated, cart);

        Ok(())
    }

    #[test]
    fn reprice_switches_promotion_with_tier() -> TestResult {
        let engine = PricingEngine::default();
        let cart = add_times(&engine, Cart::new(), &dress(), 2, CustomerTier::Standard)?;

        assert_eq!(cart.discount_kind(), DiscountKind::None);

        let cart = engine.reprice(Some(&cart), CustomerTier::Preferred)?;

        assert_eq!(cart.discount_kind(), DiscountKind::PercentageOff);
        assert_eq!(cart.discount(), Decimal::new(24_225, 3));

        Ok(())
    }

    #[test]
    fn cart_from_items_rejects_duplicates() -> TestResult {
        let engine = PricingEngine::default();
        let line = LineItem::from_product(&t_shirt())?;

        let result = engine.cart_from_items([line.clone(), line], CustomerTier::Standard);

        assert_eq!(result, Err(CartError::DuplicateProduct(ProductId::new(1))));

        Ok(())
    }

    #[test]
    fn cart_from_items_prices_lines() -> TestResult {
        let engine = PricingEngine::default();
        let lines = [
            LineItem::from_product(&t_shirt())?,
            LineItem::from_product(&jeans())?,
            LineItem::from_product(&dress())?,
        ];

        let cart = engine.cart_from_items(lines, CustomerTier::Standard)?;

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.discount(), Decimal::new(35_99, 2));

        Ok(())
    }

    #[test]
    fn engine_uses_configured_rules() -> TestResult {
        let engine = PricingEngine::new(PricingRules {
            percentage_off: PercentageOff::new(Percentage::from(Decimal::new(50, 2))),
            ..PricingRules::default()
        });

        let cart = engine.add_item(None, &jeans(), CustomerTier::Preferred)?;

        assert_eq!(cart.discount(), Decimal::new(32_75, 2));

        Ok(())
    }
}
