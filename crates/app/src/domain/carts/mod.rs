//! Carts

pub mod errors;
pub mod outcomes;
pub mod service;
pub mod store;

pub use errors::CartsServiceError;
pub use outcomes::{CartOutcome, CartUpdate};
pub use service::*;
pub use store::SessionCarts;
