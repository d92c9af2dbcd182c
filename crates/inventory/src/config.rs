//! Store configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_DATA_PATH: &str = "inventory.json";
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Defaults used by the store's convenience operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// File used by `load_default` / `save_default`.
    pub data_path: PathBuf,
    /// Items strictly below this quantity count as low stock.
    pub low_stock_threshold: i64,
}

impl StoreConfig {
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    pub fn with_low_stock_threshold(mut self, threshold: i64) -> Self {
        self.low_stock_threshold = threshold;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}
