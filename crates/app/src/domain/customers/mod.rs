//! Customers

pub mod service;

pub use service::*;
