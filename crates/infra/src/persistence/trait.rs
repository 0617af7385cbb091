use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use stockroom_inventory::ProductStore;
use stockroom_products::Product;

/// Persistence operation error.
///
/// These are **infrastructure errors** (file access, file contents) as opposed
/// to domain errors (user input, row addressing).
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The backing file could not be opened, read or written.
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A record in the backing file has a field that does not parse.
    #[error("{}:{line}: invalid {field} {value:?}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        field: &'static str,
        value: String,
    },
}

impl PersistenceError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Whole-table persistence for the product list.
///
/// ## Contract
///
/// - `save` replaces everything previously saved with `products`, in order.
/// - `load` returns what the last successful `save` wrote. Nothing saved yet
///   (e.g. no file on first run) is an empty store, not an error.
/// - Implementations acquire and release their resources inside each call.
pub trait ProductRepository {
    fn load(&self) -> Result<ProductStore, PersistenceError>;

    fn save(&self, products: &[Product]) -> Result<(), PersistenceError>;
}

impl<R> ProductRepository for Arc<R>
where
    R: ProductRepository + ?Sized,
{
    fn load(&self) -> Result<ProductStore, PersistenceError> {
        (**self).load()
    }

    fn save(&self, products: &[Product]) -> Result<(), PersistenceError> {
        (**self).save(products)
    }
}
