//! Autocart
//!
//! Autocart is the shopping-cart state manager of the vehicle marketplace
//! storefront. It keeps the shopper's selected vehicles and quantities, merges
//! repeated additions into a single line, computes totals in integer centavos
//! and reports every change to a notification sink and to subscribers.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod notifications;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod summary;
pub mod utils;
