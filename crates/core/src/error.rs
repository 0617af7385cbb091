//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures caused by user input or by
/// addressing a row that does not exist. Storage failures belong to the
/// infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// User-supplied text or value failed validation (e.g. a non-numeric price).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A row index does not address an existing product.
    #[error("row {index} is out of range (store has {len} rows)")]
    IndexOutOfRange { index: usize, len: usize },

    /// An operation needed a selected row but none was selected.
    #[error("no product selected")]
    NoSelection,
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// True for both "bad row" flavours: an explicit out-of-range index and a
    /// missing selection.
    pub fn is_index_error(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. } | Self::NoSelection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_names_index_and_len() {
        let err = DomainError::out_of_range(5, 1);
        assert_eq!(err.to_string(), "row 5 is out of range (store has 1 rows)");
    }

    #[test]
    fn selection_and_range_errors_are_index_errors() {
        assert!(DomainError::NoSelection.is_index_error());
        assert!(DomainError::out_of_range(0, 0).is_index_error());
        assert!(!DomainError::invalid_input("x").is_index_error());
    }
}
