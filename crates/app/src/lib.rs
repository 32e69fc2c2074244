//! Tally application services: catalog lookup, customer tiers and per-session
//! carts priced by the `tally` engine.

pub mod cli;
pub mod config;
pub mod context;
pub mod domain;
pub mod observability;

#[cfg(test)]
mod test;
