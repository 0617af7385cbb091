//! `stockroom-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod input;

pub use error::{DomainError, DomainResult};
pub use input::{
    check_name, check_unit_price, parse_delta, parse_quantity, parse_unit_price, validate_name,
};
