//! Infrastructure layer: flat-file persistence, write-through service, config.

pub mod config;
pub mod persistence;
pub mod service;

pub use config::{ConfigError, LoadPolicy, StoreConfig};
pub use persistence::{
    FlatFileRepository, InMemoryRepository, PersistenceError, ProductRepository,
};
pub use service::{ErrorKind, InventoryService, ServiceError};
