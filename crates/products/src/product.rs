use serde::Serialize;

use stockroom_core::{DomainError, DomainResult, check_name, check_unit_price, validate_name};

/// A product line in the stock list: name, price per unit, quantity on hand.
///
/// Fields are private so every instance has passed validation: a non-blank
/// name without separator characters and a finite, non-negative price.
/// Quantity has no lower bound.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    name: String,
    unit_price: f64,
    quantity: i64,
}

impl Product {
    /// Build a product from typed values.
    pub fn new(name: &str, unit_price: f64, quantity: i64) -> DomainResult<Self> {
        Ok(Self {
            name: validate_name(name)?,
            unit_price: check_unit_price(unit_price)?,
            quantity,
        })
    }

    /// Build a product from a stored record, keeping the name exactly as stored.
    pub fn from_record(name: &str, unit_price: f64, quantity: i64) -> DomainResult<Self> {
        Ok(Self {
            name: check_name(name)?.to_string(),
            unit_price: check_unit_price(unit_price)?,
            quantity,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Case-insensitive substring match on the name.
    ///
    /// `needle_lower` must already be lowercased; callers scanning many rows
    /// lowercase the needle once.
    pub fn name_contains_lower(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
    }

    /// Add `delta` (possibly negative) to the quantity on hand.
    ///
    /// Leaves the product unchanged if the result would overflow.
    pub fn adjust_quantity(&mut self, delta: i64) -> DomainResult<()> {
        let next = self.quantity.checked_add(delta).ok_or_else(|| {
            DomainError::invalid_input(format!(
                "adjusting quantity {} by {delta} overflows",
                self.quantity
            ))
        })?;
        self.quantity = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_keeps_exact_values() {
        let product = Product::new("Widget", 1.5, 10).unwrap();
        assert_eq!(product.name(), "Widget");
        assert_eq!(product.unit_price(), 1.5);
        assert_eq!(product.quantity(), 10);
    }

    #[test]
    fn new_rejects_empty_name() {
        let err = Product::new("", 1.0, 1).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn new_rejects_negative_price() {
        let err = Product::new("Widget", -0.5, 1).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn negative_quantity_is_allowed() {
        let product = Product::new("Backorder", 2.0, -4).unwrap();
        assert_eq!(product.quantity(), -4);
    }

    #[test]
    fn new_trims_name() {
        let product = Product::new(" Gear ", 3.25, 7).unwrap();
        assert_eq!(product.name(), "Gear");
    }

    #[test]
    fn from_record_keeps_name_untrimmed() {
        let product = Product::from_record(" Widget ", 1.5, 10).unwrap();
        assert_eq!(product.name(), " Widget ");

        let err = Product::from_record("", 1.5, 10).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn name_match_ignores_case() {
        let product = Product::new("Blue Widget", 1.0, 1).unwrap();
        assert!(product.name_contains_lower("widget"));
        assert!(product.name_contains_lower("blue w"));
        assert!(product.name_contains_lower(""));
        assert!(!product.name_contains_lower("gadget"));
    }

    #[test]
    fn adjust_quantity_adds_delta() {
        let mut product = Product::new("Widget", 1.5, 10).unwrap();
        product.adjust_quantity(5).unwrap();
        assert_eq!(product.quantity(), 15);
        product.adjust_quantity(-20).unwrap();
        assert_eq!(product.quantity(), -5);
    }

    #[test]
    fn adjust_quantity_overflow_leaves_value() {
        let mut product = Product::new("Widget", 1.5, i64::MAX).unwrap();
        let err = product.adjust_quantity(1).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert_eq!(product.quantity(), i64::MAX);
    }

    #[test]
    fn serializes_as_json_record() {
        let product = Product::new("Widget", 1.5, 10).unwrap();
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": "Widget", "unit_price": 1.5, "quantity": 10 })
        );
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: a failed adjustment never changes the quantity.
            #[test]
            fn adjust_is_all_or_nothing(start in any::<i64>(), delta in any::<i64>()) {
                let mut product = Product::new("Widget", 1.0, start).unwrap();
                match product.adjust_quantity(delta) {
                    Ok(()) => prop_assert_eq!(product.quantity(), start + delta),
                    Err(_) => prop_assert_eq!(product.quantity(), start),
                }
            }
        }
    }
}
