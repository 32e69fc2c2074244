//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rusty_money::iso::Currency;
use tally::{
    catalog::Catalog,
    products::{Product, ProductId},
};

use crate::domain::products::errors::ProductsServiceError;

/// Products served from an in-memory [`Catalog`].
#[derive(Debug, Clone)]
pub struct CatalogProductsService {
    catalog: Arc<Catalog>,
}

impl CatalogProductsService {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Currency every catalog price is expressed in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.catalog.currency()
    }
}

#[async_trait]
impl ProductsService for CatalogProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        Ok(self.catalog.products().to_vec())
    }

    async fn get_product(&self, product: ProductId) -> Result<Product, ProductsServiceError> {
        self.catalog
            .get(product)
            .cloned()
            .ok_or(ProductsServiceError::NotFound(product))
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products in listing order.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductId) -> Result<Product, ProductsServiceError>;
}
