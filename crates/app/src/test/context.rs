//! Test context for service-level tests.

use std::sync::Arc;

use tally::{catalog::Catalog, engine::PricingEngine};

use crate::domain::{
    carts::SessionCartsService, customers::InMemoryCustomersService,
    products::CatalogProductsService, sessions::SessionId,
};

/// Services wired over the demo catalog with default promotion rules.
pub(crate) struct TestContext {
    pub session: SessionId,
    pub products: Arc<CatalogProductsService>,
    pub customers: Arc<InMemoryCustomersService>,
    pub carts: SessionCartsService,
}

impl TestContext {
    pub(crate) fn new() -> Self {
        let products = Arc::new(CatalogProductsService::new(Catalog::sample()));
        let customers = Arc::new(InMemoryCustomersService::new());

        let carts = SessionCartsService::new(
            products.clone(),
            customers.clone(),
            PricingEngine::default(),
        );

        Self {
            session: SessionId::new(),
            products,
            customers,
            carts,
        }
    }
}
