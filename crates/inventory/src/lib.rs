//! Inventory domain module.
//!
//! This crate contains the in-memory product table and its business rules,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod command;
pub mod store;

pub use command::{AddProduct, AdjustQuantity, CommandOutcome, InventoryCommand, RemoveProduct};
pub use store::ProductStore;
