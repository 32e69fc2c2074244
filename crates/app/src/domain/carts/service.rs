//! Carts service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tally::{
    cart::{Cart, UpdateDirection},
    engine::PricingEngine,
    products::ProductId,
    tiers::CustomerTier,
};
use tracing::{Span, debug, info};

use crate::domain::{
    carts::{
        errors::CartsServiceError,
        outcomes::{CartOutcome, CartUpdate},
        store::SessionCarts,
    },
    customers::CustomersService,
    products::{ProductsService, ProductsServiceError},
    sessions::SessionId,
};

/// Session carts priced by a [`PricingEngine`].
///
/// Every change runs while holding the session's cart lock, so the cart it
/// reads is the cart it replaces.
pub struct SessionCartsService {
    products: Arc<dyn ProductsService>,
    customers: Arc<dyn CustomersService>,
    carts: SessionCarts,
    engine: PricingEngine,
}

impl SessionCartsService {
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductsService>,
        customers: Arc<dyn CustomersService>,
        engine: PricingEngine,
    ) -> Self {
        Self {
            products,
            customers,
            carts: SessionCarts::new(),
            engine,
        }
    }
}

impl std::fmt::Debug for SessionCartsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCartsService")
            .field("carts", &self.carts)
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CartsService for SessionCartsService {
    async fn get_cart(&self, session: SessionId) -> Result<Cart, CartsServiceError> {
        Ok(self.carts.snapshot(session).await.unwrap_or_default())
    }

    #[tracing::instrument(
        name = "carts.service.add_item",
        skip_all,
        fields(session = %session, product = %product, outcome = tracing::field::Empty),
        err
    )]
    async fn add_item(
        &self,
        session: SessionId,
        product: ProductId,
    ) -> Result<CartUpdate, CartsServiceError> {
        let product = match self.products.get_product(product).await {
            Ok(product) => product,
            Err(ProductsServiceError::NotFound(_)) => {
                debug!("product not in catalog");

                let cart = self.reprice_existing(session).await?;

                return Ok(finish(CartOutcome::ProductNotFound, cart));
            }
        };

        let mut cart = self.carts.lock(session).await;
        let tier = self.customers.get_tier(session).await;

        *cart = self.engine.add_item(Some(&*cart), &product, tier)?;

        info!(total = %cart.total(), "added product to cart");

        Ok(finish(CartOutcome::ProductAdded, cart.clone()))
    }

    #[tracing::instrument(
        name = "carts.service.update_item_quantity",
        skip_all,
        fields(
            session = %session,
            product = %product,
            direction = ?direction,
            outcome = tracing::field::Empty
        ),
        err
    )]
    async fn update_item_quantity(
        &self,
        session: SessionId,
        product: ProductId,
        direction: UpdateDirection,
    ) -> Result<CartUpdate, CartsServiceError> {
        let Some(mut cart) = self.carts.lock_existing(session).await else {
            debug!("session has no cart");

            return Ok(finish(CartOutcome::ItemNotFound, Cart::new()));
        };

        let tier = self.customers.get_tier(session).await;

        if !cart.contains(product) {
            debug!("item not in cart");

            *cart = self.engine.reprice(Some(&*cart), tier)?;

            return Ok(finish(CartOutcome::ItemNotFound, cart.clone()));
        }

        *cart = self
            .engine
            .update_item_quantity(Some(&*cart), product, direction, tier)?;

        let outcome = if cart.contains(product) {
            CartOutcome::QuantityUpdated
        } else {
            CartOutcome::ItemRemoved
        };

        info!(total = %cart.total(), "updated item quantity");

        Ok(finish(outcome, cart.clone()))
    }

    #[tracing::instrument(
        name = "carts.service.set_item_quantity",
        skip_all,
        fields(
            session = %session,
            product = %product,
            quantity = quantity,
            outcome = tracing::field::Empty
        ),
        err
    )]
    async fn set_item_quantity(
        &self,
        session: SessionId,
        product: ProductId,
        quantity: i64,
    ) -> Result<CartUpdate, CartsServiceError> {
        let Some(mut cart) = self.carts.lock_existing(session).await else {
            debug!("session has no cart");

            return Ok(finish(CartOutcome::ItemNotFound, Cart::new()));
        };

        let tier = self.customers.get_tier(session).await;

        if !cart.contains(product) {
            debug!("item not in cart");

            *cart = self.engine.reprice(Some(&*cart), tier)?;

            return Ok(finish(CartOutcome::ItemNotFound, cart.clone()));
        }

        *cart = self
            .engine
            .set_item_quantity(Some(&*cart), product, quantity, tier)?;

        let outcome = if quantity <= 0 {
            CartOutcome::ItemRemoved
        } else {
            CartOutcome::QuantityUpdated
        };

        info!(total = %cart.total(), "set item quantity");

        Ok(finish(outcome, cart.clone()))
    }

    #[tracing::instrument(
        name = "carts.service.remove_item",
        skip_all,
        fields(session = %session, product = %product, outcome = tracing::field::Empty),
        err
    )]
    async fn remove_item(
        &self,
        session: SessionId,
        product: ProductId,
    ) -> Result<CartUpdate, CartsServiceError> {
        let Some(mut cart) = self.carts.lock_existing(session).await else {
            debug!("session has no cart");

            return Ok(finish(CartOutcome::ItemNotFound, Cart::new()));
        };

        let tier = self.customers.get_tier(session).await;

        if !cart.contains(product) {
            debug!("item not in cart");

            *cart = self.engine.reprice(Some(&*cart), tier)?;

            return Ok(finish(CartOutcome::ItemNotFound, cart.clone()));
        }

        *cart = self.engine.remove_item(Some(&*cart), product, tier)?;

        info!(total = %cart.total(), "removed item from cart");

        Ok(finish(CartOutcome::ItemRemoved, cart.clone()))
    }

    #[tracing::instrument(
        name = "carts.service.set_customer_tier",
        skip_all,
        fields(session = %session, tier = %tier, outcome = tracing::field::Empty),
        err
    )]
    async fn set_customer_tier(
        &self,
        session: SessionId,
        tier: CustomerTier,
    ) -> Result<CartUpdate, CartsServiceError> {
        let mut cart = self.carts.lock(session).await;

        self.customers.set_tier(session, tier).await;

        *cart = self.engine.reprice(Some(&*cart), tier)?;

        info!(total = %cart.total(), discount = %cart.applied_discount().kind(), "repriced cart");

        Ok(finish(CartOutcome::TierUpdated(tier), cart.clone()))
    }
}

impl SessionCartsService {
    /// Reprice a stored cart under the session's current tier. Sessions
    /// without a cart get the empty cart and no slot.
    async fn reprice_existing(&self, session: SessionId) -> Result<Cart, CartsServiceError> {
        let Some(mut cart) = self.carts.lock_existing(session).await else {
            return Ok(Cart::new());
        };

        let tier = self.customers.get_tier(session).await;

        *cart = self.engine.reprice(Some(&*cart), tier)?;

        Ok(cart.clone())
    }
}

fn finish(outcome: CartOutcome, cart: Cart) -> CartUpdate {
    Span::current().record("outcome", tracing::field::display(outcome));

    CartUpdate { outcome, cart }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Current cart for the session; empty if nothing was added yet.
    async fn get_cart(&self, session: SessionId) -> Result<Cart, CartsServiceError>;

    /// Add one unit of a catalog product.
    async fn add_item(
        &self,
        session: SessionId,
        product: ProductId,
    ) -> Result<CartUpdate, CartsServiceError>;

    /// Step an existing item's quantity up or down by one.
    async fn update_item_quantity(
        &self,
        session: SessionId,
        product: ProductId,
        direction: UpdateDirection,
    ) -> Result<CartUpdate, CartsServiceError>;

    /// Set an existing item's quantity; zero or below removes it.
    async fn set_item_quantity(
        &self,
        session: SessionId,
        product: ProductId,
        quantity: i64,
    ) -> Result<CartUpdate, CartsServiceError>;

    /// Remove an item regardless of its quantity.
    async fn remove_item(
        &self,
        session: SessionId,
        product: ProductId,
    ) -> Result<CartUpdate, CartsServiceError>;

    /// Change the session's tier and reprice its cart.
    async fn set_customer_tier(
        &self,
        session: SessionId,
        tier: CustomerTier,
    ) -> Result<CartUpdate, CartsServiceError>;
}
