//! App Context

use std::sync::Arc;

use rusty_money::iso::Currency;
use tally::{
    catalog::Catalog, engine::PricingEngine, fixtures::FixtureError, promotions::PricingRules,
};
use thiserror::Error;

use crate::{
    config::CatalogConfig,
    domain::{
        carts::{CartsService, SessionCartsService},
        customers::{CustomersService, InMemoryCustomersService},
        products::{CatalogProductsService, ProductsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to load catalog")]
    Catalog(#[source] FixtureError),

    #[error("failed to load promotion rules")]
    Rules(#[source] FixtureError),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub currency: &'static Currency,
}

impl AppContext {
    /// Wire the in-memory services around `catalog`, pricing carts with `rules`.
    #[must_use]
    pub fn new(catalog: Catalog, rules: PricingRules) -> Self {
        let products = CatalogProductsService::new(catalog);
        let currency = products.currency();

        let products: Arc<dyn ProductsService> = Arc::new(products);
        let customers: Arc<dyn CustomersService> = Arc::new(InMemoryCustomersService::new());

        // Tiers are only changed through the carts service.
        let carts = SessionCartsService::new(
            Arc::clone(&products),
            customers,
            PricingEngine::new(rules),
        );

        Self {
            products,
            carts: Arc::new(carts),
            currency,
        }
    }

    /// Build application context from configured catalog and rule files.
    ///
    /// # Errors
    ///
    /// Returns an error when either file cannot be loaded.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, AppInitError> {
        let catalog = config.load_catalog().map_err(AppInitError::Catalog)?;
        let rules = config.load_rules().map_err(AppInitError::Rules)?;

        Ok(Self::new(catalog, rules))
    }
}
