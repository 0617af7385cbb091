use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use stockroom_core::{check_name, parse_quantity, parse_unit_price};
use stockroom_inventory::ProductStore;
use stockroom_products::Product;

use super::r#trait::{PersistenceError, ProductRepository};
use crate::config::LoadPolicy;

const FIELD_SEPARATOR: char = ',';
const FIELD_COUNT: usize = 3;

/// Product list stored as a comma-separated text file, one product per line:
///
/// ```text
/// <name>,<unit_price>,<quantity>
/// ```
///
/// `save` truncates and rewrites the whole file in place. There is no temp
/// file and no rename, so an interrupted write can lose the previous content.
#[derive(Debug, Clone)]
pub struct FlatFileRepository {
    path: PathBuf,
    policy: LoadPolicy,
}

impl FlatFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            policy: LoadPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> LoadPolicy {
        self.policy
    }

    fn decode_line(&self, line_no: usize, line: &str) -> Option<Result<Product, PersistenceError>> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        let [name, unit_price, quantity] = fields.as_slice() else {
            tracing::debug!(
                path = %self.path.display(),
                line = line_no,
                fields = fields.len(),
                "skipping line without {FIELD_COUNT} fields"
            );
            return None;
        };

        if let Err(err) = check_name(name) {
            tracing::debug!(
                path = %self.path.display(),
                line = line_no,
                error = %err,
                "skipping record with unusable name"
            );
            return None;
        }

        let parse_err = |field: &'static str, value: &str| PersistenceError::Parse {
            path: self.path.clone(),
            line: line_no,
            field,
            value: value.to_string(),
        };

        let record = parse_unit_price(unit_price)
            .map_err(|_| parse_err("unit price", unit_price))
            .and_then(|price| {
                parse_quantity(quantity)
                    .map(|qty| (price, qty))
                    .map_err(|_| parse_err("quantity", quantity))
            })
            .and_then(|(price, qty)| {
                // The name already passed `check_name`, so only the price can fail here.
                Product::from_record(name, price, qty)
                    .map_err(|_| parse_err("unit price", unit_price))
            });
        Some(record)
    }
}

/// Render one product as a file line (without the line break).
///
/// Prices use the shortest text that parses back to the same `f64` and always
/// keep a fractional part (`10.0`, `1.5`).
pub fn encode_record(product: &Product) -> String {
    format!(
        "{}{FIELD_SEPARATOR}{:?}{FIELD_SEPARATOR}{}",
        product.name(),
        product.unit_price(),
        product.quantity()
    )
}

impl ProductRepository for FlatFileRepository {
    fn load(&self) -> Result<ProductStore, PersistenceError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no product file yet; starting empty");
                return Ok(ProductStore::new());
            }
            Err(err) => return Err(PersistenceError::io("open", &self.path, err)),
        };

        let mut store = ProductStore::new();
        let mut skipped = 0usize;
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| PersistenceError::io("read", &self.path, e))?;
            let line_no = idx + 1;

            match self.decode_line(line_no, &line) {
                None => skipped += 1,
                Some(Ok(product)) => {
                    store.push(product);
                }
                Some(Err(err)) => match self.policy {
                    LoadPolicy::Strict => return Err(err),
                    LoadPolicy::Lenient => {
                        tracing::warn!(error = %err, "skipping unreadable product record");
                        skipped += 1;
                    }
                },
            }
        }

        tracing::info!(
            path = %self.path.display(),
            products = store.len(),
            skipped,
            "loaded product list"
        );
        Ok(store)
    }

    fn save(&self, products: &[Product]) -> Result<(), PersistenceError> {
        let file =
            File::create(&self.path).map_err(|e| PersistenceError::io("create", &self.path, e))?;
        let mut writer = BufWriter::new(file);

        for product in products {
            writeln!(writer, "{}", encode_record(product))
                .map_err(|e| PersistenceError::io("write", &self.path, e))?;
        }
        writer
            .flush()
            .map_err(|e| PersistenceError::io("write", &self.path, e))?;

        tracing::debug!(
            path = %self.path.display(),
            products = products.len(),
            "saved product list"
        );
        Ok(())
    }
}
