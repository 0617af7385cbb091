use stockroom_core::{DomainError, DomainResult};
use stockroom_products::Product;

use crate::command::{AddProduct, AdjustQuantity, CommandOutcome, InventoryCommand, RemoveProduct};

/// Ordered, in-memory product table.
///
/// Rows are addressed by position. Insertion order is preserved, and removing
/// a row shifts every later row's index down by one. Every failing operation
/// leaves the table unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductStore {
    products: Vec<Product>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn as_slice(&self) -> &[Product] {
        &self.products
    }

    /// Index of the first product whose name contains `term`, ignoring case.
    ///
    /// The empty term matches the first row.
    pub fn find_first_match(&self, term: &str) -> Option<usize> {
        let needle = term.to_lowercase();
        self.products
            .iter()
            .position(|p| p.name_contains_lower(&needle))
    }

    /// Append a validated product, returning its index.
    pub fn push(&mut self, product: Product) -> usize {
        self.products.push(product);
        self.products.len() - 1
    }

    /// Append a new product built from typed values.
    pub fn add(&mut self, name: &str, unit_price: f64, quantity: i64) -> DomainResult<usize> {
        let product = Product::new(name, unit_price, quantity)?;
        Ok(self.push(product))
    }

    /// Add `delta` to the quantity of the row at `index`, returning the new quantity.
    pub fn adjust_quantity(&mut self, index: usize, delta: i64) -> DomainResult<i64> {
        let product = self.row_mut(index)?;
        product.adjust_quantity(delta)?;
        Ok(product.quantity())
    }

    /// Remove and return the row at `index`.
    pub fn remove_at(&mut self, index: usize) -> DomainResult<Product> {
        self.check_index(index)?;
        Ok(self.products.remove(index))
    }

    /// Apply one mutating command.
    pub fn handle(&mut self, command: &InventoryCommand) -> DomainResult<CommandOutcome> {
        match command {
            InventoryCommand::AddProduct(AddProduct {
                name,
                unit_price,
                quantity,
            }) => {
                let index = self.add(name, *unit_price, *quantity)?;
                Ok(CommandOutcome::Added { index })
            }
            InventoryCommand::AdjustQuantity(AdjustQuantity { index, delta }) => {
                let quantity = self.adjust_quantity(*index, *delta)?;
                Ok(CommandOutcome::Adjusted {
                    index: *index,
                    quantity,
                })
            }
            InventoryCommand::RemoveProduct(RemoveProduct { index }) => {
                let product = self.remove_at(*index)?;
                Ok(CommandOutcome::Removed {
                    index: *index,
                    product,
                })
            }
        }
    }

    fn check_index(&self, index: usize) -> DomainResult<()> {
        if index < self.products.len() {
            Ok(())
        } else {
            Err(DomainError::out_of_range(index, self.products.len()))
        }
    }

    fn row_mut(&mut self, index: usize) -> DomainResult<&mut Product> {
        let len = self.products.len();
        self.products
            .get_mut(index)
            .ok_or(DomainError::out_of_range(index, len))
    }
}

impl FromIterator<Product> for ProductStore {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Self::from_products(iter.into_iter().collect())
    }
}
