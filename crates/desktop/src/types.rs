//! Values handed from the session to whatever renders it.

use stockroom_products::Product;

/// Text shown in the status line after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage(String);

impl StatusMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Status: {}", self.0)
    }
}

/// Result of a search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The first matching row, now selected.
    Found { index: usize, product: Product },
    /// No product name contains the term.
    NotFound { term: String },
}

impl SearchOutcome {
    pub fn index(&self) -> Option<usize> {
        match self {
            SearchOutcome::Found { index, .. } => Some(*index),
            SearchOutcome::NotFound { .. } => None,
        }
    }
}
