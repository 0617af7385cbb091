//! Presentation-layer state: the product table plus the selected row.

use stockroom_core::DomainError;
use stockroom_infra::{InventoryService, PersistenceError, ProductRepository, ServiceError};
use stockroom_products::Product;

use crate::messages::{PRODUCT_ADDED, PRODUCT_DELETED, STOCK_ADDED};
use crate::types::{SearchOutcome, StatusMessage};

/// One user's working session over the product list.
///
/// The session owns the service (and through it the store and the backing
/// file) and tracks which row is selected. Stock operations act on the
/// selected row.
#[derive(Debug)]
pub struct AdminSession<R> {
    service: InventoryService<R>,
    selected: Option<usize>,
}

impl<R> AdminSession<R> {
    pub fn new(service: InventoryService<R>) -> Self {
        Self {
            service,
            selected: None,
        }
    }

    pub fn service(&self) -> &InventoryService<R> {
        &self.service
    }

    pub fn products(&self) -> &[Product] {
        self.service.store().as_slice()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.selected.and_then(|i| self.service.store().get(i))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Select the row at `index`.
    pub fn select(&mut self, index: usize) -> Result<&Product, ServiceError> {
        let len = self.products().len();
        if index >= len {
            return Err(DomainError::out_of_range(index, len).into());
        }
        self.selected = Some(index);
        Ok(&self.products()[index])
    }

    /// Find the first product whose name contains `term` (trimmed, any case)
    /// and select it. A miss leaves the selection alone.
    pub fn search(&mut self, term: &str) -> SearchOutcome {
        let term = term.trim();
        match self.service.find_first_match(term) {
            Some(index) => {
                self.selected = Some(index);
                let product = self.products()[index].clone();
                SearchOutcome::Found { index, product }
            }
            None => SearchOutcome::NotFound {
                term: term.to_string(),
            },
        }
    }

    fn require_selection(&self) -> Result<usize, ServiceError> {
        self.selected.ok_or(ServiceError::Domain(DomainError::NoSelection))
    }
}

impl<R> AdminSession<R>
where
    R: ProductRepository,
{
    /// Load the product list from `repository` and start with no selection.
    pub fn open(repository: R) -> Result<Self, PersistenceError> {
        Ok(Self::new(InventoryService::open(repository)?))
    }

    /// Add a user-entered amount to the selected product's quantity.
    pub fn add_stock(&mut self, quantity: &str) -> Result<StatusMessage, ServiceError> {
        let index = self.require_selection()?;
        self.service.adjust_quantity(index, quantity)?;
        Ok(StatusMessage::new(STOCK_ADDED))
    }

    /// Delete the selected product and clear the selection.
    pub fn delete_stock(&mut self) -> Result<StatusMessage, ServiceError> {
        let index = self.require_selection()?;
        let before = self.products().len();
        let result = self.service.remove_at(index);
        if self.products().len() < before {
            // The row is gone in memory even when the save failed.
            self.clear_selection();
        }
        result.map(|_| StatusMessage::new(PRODUCT_DELETED))
    }

    /// Add a product from user-entered text and select it.
    pub fn add_product(
        &mut self,
        name: &str,
        unit_price: &str,
        quantity: &str,
    ) -> Result<StatusMessage, ServiceError> {
        let before = self.products().len();
        let result = self.service.add_product(name, unit_price, quantity);
        if self.products().len() > before {
            self.selected = Some(before);
        }
        result.map(|_| StatusMessage::new(PRODUCT_ADDED))
    }
}
