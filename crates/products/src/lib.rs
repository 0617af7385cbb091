//! Products domain module.
//!
//! This crate defines the product record held by the inventory store,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod product;

pub use product::Product;
