//! Tally
//!
//! Tally is a small shopping-cart pricing engine. Given a cart's line items and
//! the customer's tier it calculates the subtotal, picks the better of two
//! competing promotions, and derives the total. Cart changes are pure
//! transformations that always return a freshly priced cart.

pub mod cart;
pub mod catalog;
pub mod discounts;
pub mod engine;
pub mod fixtures;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod promotions;
pub mod tiers;
pub mod totals;
