//! Product list persistence.

pub mod flat_file;
pub mod in_memory;
pub mod r#trait;

pub use flat_file::FlatFileRepository;
pub use in_memory::InMemoryRepository;
pub use r#trait::{PersistenceError, ProductRepository};
