//! Carts service errors.

use tally::cart::CartError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart could not be updated: {0}")]
    Cart(#[from] CartError),
}
