//! User-facing wording for operation results.

use stockroom_core::DomainError;
use stockroom_infra::{PersistenceError, ServiceError};

pub const STOCK_ADDED: &str = "Stock added successfully.";
pub const PRODUCT_DELETED: &str = "Product deleted successfully.";
pub const PRODUCT_ADDED: &str = "Product added successfully.";
pub const PRODUCT_NOT_PRESENT: &str = "The product is not present.";

/// Turn an operation error into text for the user.
pub fn describe_error(err: &ServiceError) -> String {
    match err {
        ServiceError::Domain(DomainError::InvalidInput(detail)) => {
            format!("Invalid input: {detail}. Please enter valid values.")
        }
        ServiceError::Domain(DomainError::NoSelection) => {
            "No product selected. Please select a product first.".to_string()
        }
        ServiceError::Domain(DomainError::IndexOutOfRange { index, len }) => {
            format!("Row {index} does not exist (there are {len} products).")
        }
        ServiceError::Persistence(PersistenceError::Io { .. }) => format!(
            "Could not save the product list ({err}). \
             The change is kept in memory until the next successful save."
        ),
        ServiceError::Persistence(PersistenceError::Parse { .. }) => {
            format!("The product file is damaged: {err}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_domain_errors() {
        let msg =
            describe_error(&DomainError::invalid_input("price \"abc\" is not a number").into());
        assert_eq!(
            msg,
            "Invalid input: price \"abc\" is not a number. Please enter valid values."
        );

        let msg = describe_error(&DomainError::NoSelection.into());
        assert!(msg.contains("select a product"));

        let msg = describe_error(&DomainError::out_of_range(4, 2).into());
        assert_eq!(msg, "Row 4 does not exist (there are 2 products).");
    }

    #[test]
    fn describes_save_failure() {
        let err: ServiceError = PersistenceError::io(
            "create",
            "/ro/product_data.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        )
        .into();
        let msg = describe_error(&err);
        assert!(msg.starts_with("Could not save the product list"));
        assert!(msg.contains("/ro/product_data.txt"));
        assert!(msg.contains("kept in memory"));
    }
}
