use std::io;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use stockroom_inventory::ProductStore;
use stockroom_products::Product;

use super::r#trait::{PersistenceError, ProductRepository};

const MEMORY_PATH: &str = "<memory>";

/// In-memory product repository.
///
/// Intended for tests/dev. Saves can be made to fail on demand to exercise the
/// write-through failure path.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    rows: RwLock<Vec<Product>>,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `rows` already "on disk".
    pub fn with_rows(rows: Vec<Product>) -> Self {
        Self {
            rows: RwLock::new(rows),
            ..Self::default()
        }
    }

    /// Make every following `save` fail (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Snapshot of what was last saved.
    pub fn rows(&self) -> Vec<Product> {
        self.rows.read().map(|r| r.clone()).unwrap_or_default()
    }

    fn poisoned() -> PersistenceError {
        PersistenceError::io(
            "lock",
            MEMORY_PATH,
            io::Error::other("lock poisoned"),
        )
    }
}

impl ProductRepository for InMemoryRepository {
    fn load(&self) -> Result<ProductStore, PersistenceError> {
        let rows = self.rows.read().map_err(|_| Self::poisoned())?;
        Ok(ProductStore::from_products(rows.clone()))
    }

    fn save(&self, products: &[Product]) -> Result<(), PersistenceError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(PersistenceError::io(
                "create",
                MEMORY_PATH,
                io::Error::new(io::ErrorKind::PermissionDenied, "saves disabled"),
            ));
        }
        let mut rows = self.rows.write().map_err(|_| Self::poisoned())?;
        *rows = products.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
