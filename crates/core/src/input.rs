//! Validation of user-entered text.
//!
//! Every helper trims surrounding whitespace before parsing and reports
//! failures as [`DomainError::InvalidInput`].

use crate::error::{DomainError, DomainResult};

/// Characters that cannot appear in a product name because the flat file has
/// no quoting scheme.
const FORBIDDEN_NAME_CHARS: [char; 3] = [',', '\n', '\r'];

/// Validate a product name, returning it trimmed.
pub fn validate_name(raw: &str) -> DomainResult<String> {
    check_name(raw.trim()).map(str::to_string)
}

/// Check a name exactly as given, without trimming.
///
/// Names read back from storage go through this so that surrounding
/// whitespace survives a save/load cycle.
pub fn check_name(name: &str) -> DomainResult<&str> {
    if name.trim().is_empty() {
        return Err(DomainError::invalid_input("name cannot be empty"));
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
        return Err(DomainError::invalid_input(format!(
            "name cannot contain {c:?}"
        )));
    }
    Ok(name)
}

/// Check a unit price already in numeric form.
pub fn check_unit_price(price: f64) -> DomainResult<f64> {
    if !price.is_finite() {
        return Err(DomainError::invalid_input("price must be a finite number"));
    }
    if price < 0.0 {
        return Err(DomainError::invalid_input("price cannot be negative"));
    }
    Ok(price)
}

/// Parse a unit price from user text.
pub fn parse_unit_price(raw: &str) -> DomainResult<f64> {
    let text = raw.trim();
    let price = text
        .parse::<f64>()
        .map_err(|_| DomainError::invalid_input(format!("price {text:?} is not a number")))?;
    check_unit_price(price)
}

/// Parse an initial quantity from user text.
pub fn parse_quantity(raw: &str) -> DomainResult<i64> {
    parse_integer(raw, "quantity")
}

/// Parse a stock adjustment amount from user text. Negative values are allowed.
pub fn parse_delta(raw: &str) -> DomainResult<i64> {
    parse_integer(raw, "adjustment")
}

fn parse_integer(raw: &str, what: &str) -> DomainResult<i64> {
    let text = raw.trim();
    text.parse::<i64>()
        .map_err(|_| DomainError::invalid_input(format!("{what} {text:?} is not a whole number")))
}
