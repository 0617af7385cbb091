//! Write-through command execution over the product table.
//!
//! ```text
//! Command
//!   ↓
//! 1. Apply to the in-memory ProductStore (validation happens here)
//!   ↓
//! 2. Save the whole table through the ProductRepository
//! ```
//!
//! A command rejected in step 1 changes nothing and saves nothing. A failed
//! save in step 2 is reported but the in-memory change is kept: store and
//! backing file differ until the next successful save.

use thiserror::Error;

use stockroom_core::{DomainError, parse_delta, parse_quantity, parse_unit_price, validate_name};
use stockroom_inventory::{
    AddProduct, AdjustQuantity, CommandOutcome, InventoryCommand, ProductStore, RemoveProduct,
};

use crate::persistence::{PersistenceError, ProductRepository};

/// Coarse classification of a [`ServiceError`], used by the user surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing user text.
    InvalidInput,
    /// No row selected, or the row does not exist.
    IndexOutOfRange,
    /// The backing file could not be read or written.
    IoFailure,
    /// The backing file holds a record that does not parse.
    ParseFailure,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Domain(err) if err.is_index_error() => ErrorKind::IndexOutOfRange,
            ServiceError::Domain(_) => ErrorKind::InvalidInput,
            ServiceError::Persistence(PersistenceError::Io { .. }) => ErrorKind::IoFailure,
            ServiceError::Persistence(PersistenceError::Parse { .. }) => ErrorKind::ParseFailure,
        }
    }
}

/// Owns the product table and keeps its backing store in sync.
///
/// Every successful mutation is followed by a full save. There is no batching
/// and no partial write.
#[derive(Debug)]
pub struct InventoryService<R> {
    store: ProductStore,
    repository: R,
    unsaved_changes: bool,
}

impl<R> InventoryService<R> {
    pub fn store(&self) -> &ProductStore {
        &self.store
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// True after a failed write-through save, until a save succeeds.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }

    /// Index of the first product whose name contains `term`, ignoring case.
    pub fn find_first_match(&self, term: &str) -> Option<usize> {
        self.store.find_first_match(term)
    }
}

impl<R> InventoryService<R>
where
    R: ProductRepository,
{
    /// Load the product table once from `repository`.
    pub fn open(repository: R) -> Result<Self, PersistenceError> {
        let store = repository.load()?;
        Ok(Self {
            store,
            repository,
            unsaved_changes: false,
        })
    }

    /// Apply `command` and write the whole table through.
    pub fn dispatch(&mut self, command: InventoryCommand) -> Result<CommandOutcome, ServiceError> {
        let outcome = self.store.handle(&command)?;
        self.write_through(command.command_type())?;
        Ok(outcome)
    }

    /// Add a product from user-entered text.
    pub fn add_product(
        &mut self,
        name: &str,
        unit_price: &str,
        quantity: &str,
    ) -> Result<CommandOutcome, ServiceError> {
        let command = AddProduct {
            name: validate_name(name)?,
            unit_price: parse_unit_price(unit_price)?,
            quantity: parse_quantity(quantity)?,
        };
        self.dispatch(InventoryCommand::AddProduct(command))
    }

    /// Add a user-entered amount to the row at `index`.
    ///
    /// The row is checked before the amount is parsed.
    pub fn adjust_quantity(
        &mut self,
        index: usize,
        delta: &str,
    ) -> Result<CommandOutcome, ServiceError> {
        if index >= self.store.len() {
            return Err(DomainError::out_of_range(index, self.store.len()).into());
        }
        let delta = parse_delta(delta)?;
        self.dispatch(InventoryCommand::AdjustQuantity(AdjustQuantity { index, delta }))
    }

    /// Remove the row at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<CommandOutcome, ServiceError> {
        self.dispatch(InventoryCommand::RemoveProduct(RemoveProduct { index }))
    }

    /// Save the current table, clearing the unsaved flag on success.
    pub fn save(&mut self) -> Result<(), PersistenceError> {
        match self.repository.save(self.store.as_slice()) {
            Ok(()) => {
                self.unsaved_changes = false;
                Ok(())
            }
            Err(err) => {
                self.unsaved_changes = true;
                Err(err)
            }
        }
    }

    fn write_through(&mut self, command_type: &'static str) -> Result<(), ServiceError> {
        tracing::debug!(command = command_type, "applied command");
        if let Err(err) = self.save() {
            tracing::error!(
                command = command_type,
                error = %err,
                "failed to persist product list; in-memory change kept"
            );
            return Err(err.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use stockroom_products::Product;

    use super::*;
    use crate::persistence::InMemoryRepository;

    fn widget() -> Product {
        Product::new("Widget", 1.5, 10).unwrap()
    }

    fn service_with(rows: Vec<Product>) -> InventoryService<Arc<InMemoryRepository>> {
        InventoryService::open(Arc::new(InMemoryRepository::with_rows(rows))).unwrap()
    }

    #[test]
    fn open_loads_existing_rows() {
        let service = service_with(vec![widget()]);
        assert_eq!(service.store().as_slice(), &[widget()]);
        assert!(!service.has_unsaved_changes());
    }

    #[test]
    fn add_product_writes_through() {
        let mut service = service_with(vec![]);
        let outcome = service.add_product(" Widget ", "1.5", "10").unwrap();

        assert_eq!(outcome, CommandOutcome::Added { index: 0 });
        assert_eq!(service.repository().rows(), vec![widget()]);
        assert_eq!(service.repository().save_count(), 1);
    }

    #[test]
    fn invalid_input_saves_nothing() {
        let mut service = service_with(vec![widget()]);

        let err = service.add_product("", "1.0", "1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        let err = service.add_product("Widget", "abc", "1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        let err = service.adjust_quantity(0, "many").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        assert_eq!(service.store().as_slice(), &[widget()]);
        assert_eq!(service.repository().save_count(), 0);
    }

    #[test]
    fn adjust_quantity_writes_through() {
        let mut service = service_with(vec![widget()]);
        let outcome = service.adjust_quantity(0, " 5 ").unwrap();
        assert_eq!(outcome, CommandOutcome::Adjusted { index: 0, quantity: 15 });
        assert_eq!(service.repository().rows()[0].quantity(), 15);
    }

    #[test]
    fn adjust_out_of_range_leaves_row() {
        let mut service = service_with(vec![widget()]);
        let err = service.adjust_quantity(5, "5").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
        // Row is checked before the amount is parsed.
        let err = service.adjust_quantity(5, "lots").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
        assert_eq!(service.store().get(0).unwrap().quantity(), 10);
        assert_eq!(service.repository().save_count(), 0);
    }

    #[test]
    fn remove_at_writes_through() {
        let rows: Vec<Product> = ["A", "B", "C"]
            .iter()
            .map(|n| Product::new(n, 1.0, 1).unwrap())
            .collect();
        let mut service = service_with(rows);

        match service.remove_at(1).unwrap() {
            CommandOutcome::Removed { index, product } => {
                assert_eq!(index, 1);
                assert_eq!(product.name(), "B");
            }
            other => panic!("Expected Removed outcome, got {other:?}"),
        }
        let saved: Vec<String> = service
            .repository()
            .rows()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(saved, vec!["A", "C"]);

        let err = service.remove_at(2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
    }

    #[test]
    fn failed_save_keeps_in_memory_change() {
        let mut service = service_with(vec![widget()]);
        service.repository().set_fail_saves(true);

        let err = service.adjust_quantity(0, "5").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
        assert_eq!(service.store().get(0).unwrap().quantity(), 15);
        assert_eq!(service.repository().rows()[0].quantity(), 10);
        assert!(service.has_unsaved_changes());

        service.repository().set_fail_saves(false);
        service.adjust_quantity(0, "1").unwrap();
        assert_eq!(service.repository().rows()[0].quantity(), 16);
        assert!(!service.has_unsaved_changes());
    }

    #[test]
    fn dispatch_applies_command_and_saves() {
        let mut service = service_with(vec![widget()]);
        let outcome = service
            .dispatch(InventoryCommand::AdjustQuantity(AdjustQuantity {
                index: 0,
                delta: -3,
            }))
            .unwrap();
        assert_eq!(outcome, CommandOutcome::Adjusted { index: 0, quantity: 7 });
        assert_eq!(service.repository().rows()[0].quantity(), 7);

        let err = service
            .dispatch(InventoryCommand::RemoveProduct(RemoveProduct { index: 4 }))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
        assert_eq!(service.repository().save_count(), 1);
    }

    #[test]
    fn error_kinds_cover_persistence() {
        let parse = ServiceError::from(PersistenceError::Parse {
            path: "f".into(),
            line: 1,
            field: "quantity",
            value: "x".to_string(),
        });
        assert_eq!(parse.kind(), ErrorKind::ParseFailure);
        assert_eq!(
            ServiceError::from(DomainError::NoSelection).kind(),
            ErrorKind::IndexOutOfRange
        );
    }
}
