//! Catalog

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::iso::{self, Currency};
use thiserror::Error;

use crate::products::{Product, ProductId};

/// Errors related to catalog construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A product id was listed more than once.
    #[error("product {0} is listed more than once")]
    DuplicateProduct(ProductId),
}

/// Products available for purchase, in listing order, priced in a single currency.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
    currency: &'static Currency,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            products: Vec::new(),
            index: FxHashMap::default(),
            currency,
        }
    }

    /// Create a catalog with the given products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateProduct`] if two products share an id.
    pub fn with_products(
        products: impl IntoIterator<Item = Product>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new(currency);

        products
            .into_iter()
            .try_for_each(|product| catalog.insert(product))?;

        Ok(catalog)
    }

    /// The three-product demo catalog.
    pub fn sample() -> Self {
        let products = vec![
            Product::new(1, "T-shirt", Decimal::new(35_99, 2)).with_image(
                "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=400&h=400&fit=crop&crop=center",
            ),
            Product::new(2, "Jeans", Decimal::new(65_50, 2)).with_image(
                "https://images.unsplash.com/photo-1542272604-787c3835535d?w=400&h=400&fit=crop&crop=center",
            ),
            Product::new(3, "Dress", Decimal::new(80_75, 2)).with_image(
                "https://images.unsplash.com/photo-1515372039744-b8f02a3ae446?w=400&h=400&fit=crop&crop=center",
            ),
        ];

        let index = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.id, position))
            .collect();

        Self {
            products,
            index,
            currency: iso::USD,
        }
    }

    /// Add a product to the end of the listing.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateProduct`] if the id is already listed.
    pub fn insert(&mut self, product: Product) -> Result<(), CatalogError> {
        if self.index.contains_key(&product.id) {
            return Err(CatalogError::DuplicateProduct(product.id));
        }

        self.index.insert(product.id, self.products.len());
        self.products.push(product);

        Ok(())
    }

    /// Look up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index
            .get(&id)
            .and_then(|&position| self.products.get(position))
    }

    /// All products in listing order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Currency all prices are expressed in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog lists no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
