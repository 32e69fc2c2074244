//! Tally Domain Concerns

pub mod carts;
pub mod customers;
pub mod products;
pub mod sessions;
