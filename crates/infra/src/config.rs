//! Configuration loading and representation.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::persistence::FlatFileRepository;

pub const DATA_FILE_ENV: &str = "STOCKROOM_DATA_FILE";
pub const LOAD_POLICY_ENV: &str = "STOCKROOM_LOAD_POLICY";
pub const DEFAULT_DATA_FILE: &str = "product_data.txt";

/// What to do with a record whose numeric field does not parse on load.
///
/// Records with the wrong number of fields are always skipped; this only
/// governs records with three fields and a malformed number.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Abort the whole load.
    #[default]
    Strict,
    /// Skip the record and keep going.
    Lenient,
}

impl LoadPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadPolicy::Strict => "strict",
            LoadPolicy::Lenient => "lenient",
        }
    }
}

impl core::fmt::Display for LoadPolicy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoadPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(LoadPolicy::Strict),
            "lenient" => Ok(LoadPolicy::Lenient),
            _ => Err(ConfigError::InvalidValue {
                key: LOAD_POLICY_ENV,
                value: s.to_string(),
                expected: "one of: strict, lenient",
            }),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key} (expected {expected})")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Where the product list lives and how it is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_file: PathBuf,
    pub load_policy: LoadPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            load_policy: LoadPolicy::default(),
        }
    }
}

impl StoreConfig {
    /// Read `STOCKROOM_DATA_FILE` and `STOCKROOM_LOAD_POLICY`, falling back to
    /// defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(path) = lookup(DATA_FILE_ENV).filter(|p| !p.trim().is_empty()) {
            config.data_file = PathBuf::from(path);
        }
        if let Some(policy) = lookup(LOAD_POLICY_ENV) {
            config.load_policy = policy.parse()?;
        }
        Ok(config)
    }

    pub fn repository(&self) -> FlatFileRepository {
        FlatFileRepository::new(&self.data_file).with_policy(self.load_policy)
    }
}
