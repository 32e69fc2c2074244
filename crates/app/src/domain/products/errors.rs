//! Products service errors.

use tally::products::ProductId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductsServiceError {
    #[error("product {0} not found")]
    NotFound(ProductId),
}
