//! The inventory store: stock table plus the operations callers use.
//!
//! Every operation logs its own outcome. Rejected input and unknown items are
//! reported as `warn`, filesystem failures as `error`; the returned `Result`
//! carries the same information for callers that want it, and ignoring it is
//! always safe.

use std::io::{self, Write};
use std::path::Path;

use serde_json::Value;

use stockkeep_core::{DomainError, DomainResult, ItemName};

use crate::audit::AuditLog;
use crate::change::StockChange;
use crate::config::StoreConfig;
use crate::input::StockRequest;
use crate::persistence::{self, PersistenceError};
use crate::table::StockTable;

/// Header line of the console report.
pub const REPORT_HEADER: &str = "Items Report";

/// In-memory inventory owned by the caller.
#[derive(Debug, Clone, Default)]
pub struct InventoryStore {
    table: StockTable,
    config: StoreConfig,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            table: StockTable::new(),
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn table(&self) -> &StockTable {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains(name)
    }

    pub fn items(&self) -> impl Iterator<Item = (&ItemName, i64)> + '_ {
        self.table.iter()
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Add `qty` units of `name`.
    ///
    /// On success the change is recorded in `log` (when given) as
    /// `"Added <qty> of <name>"`.
    pub fn add_item(
        &mut self,
        name: &str,
        qty: i64,
        log: Option<&mut AuditLog>,
    ) -> DomainResult<StockChange> {
        let name = ItemName::new(name).or_else(|e| reject("add_item", e))?;
        self.apply_add(name, qty, log)
    }

    /// Like [`add_item`](Self::add_item), but accepts untyped JSON arguments.
    pub fn add_value(
        &mut self,
        name: &Value,
        qty: &Value,
        log: Option<&mut AuditLog>,
    ) -> DomainResult<StockChange> {
        let req = StockRequest::from_values(name, qty).or_else(|e| reject("add_item", e))?;
        self.apply_add(req.name, req.qty, log)
    }

    /// Remove `qty` units of `name`; the entry disappears once it reaches zero.
    pub fn remove_item(
        &mut self,
        name: &str,
        qty: i64,
        log: Option<&mut AuditLog>,
    ) -> DomainResult<StockChange> {
        let name = ItemName::new(name).or_else(|e| reject("remove_item", e))?;
        self.apply_remove(&name, qty, log)
    }

    /// Like [`remove_item`](Self::remove_item), but accepts untyped JSON arguments.
    pub fn remove_value(
        &mut self,
        name: &Value,
        qty: &Value,
        log: Option<&mut AuditLog>,
    ) -> DomainResult<StockChange> {
        let req = StockRequest::from_values(name, qty).or_else(|e| reject("remove_item", e))?;
        self.apply_remove(&req.name, req.qty, log)
    }

    /// Quantity on hand, 0 for unknown items.
    pub fn get_qty(&self, name: &str) -> i64 {
        self.table.get(name)
    }

    /// Names with quantity strictly below `threshold`, in table order.
    pub fn check_low_items(&self, threshold: i64) -> Vec<&str> {
        self.table.below(threshold).map(ItemName::as_str).collect()
    }

    /// [`check_low_items`](Self::check_low_items) with the configured threshold.
    pub fn low_items(&self) -> Vec<&str> {
        self.check_low_items(self.config.low_stock_threshold)
    }

    /// Replace the whole table with the contents of `path`.
    ///
    /// A missing file is a cold start: the table is emptied and `Ok(0)` is
    /// returned. Unreadable or malformed files leave the table untouched.
    /// Returns the number of items now in stock.
    pub fn load_data(&mut self, path: impl AsRef<Path>) -> Result<usize, PersistenceError> {
        let path = path.as_ref();
        match persistence::read_table(path) {
            Ok(Some(loaded)) => {
                for raw in &loaded.dropped {
                    tracing::warn!(
                        path = %path.display(),
                        item = ?raw,
                        "skipping invalid entry in inventory file"
                    );
                }
                self.table = loaded.table;
                tracing::info!(path = %path.display(), items = self.table.len(), "loaded inventory data");
                Ok(self.table.len())
            }
            Ok(None) => {
                tracing::warn!(path = %path.display(), "file not found; starting with empty inventory");
                self.table.clear();
                Ok(0)
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to load inventory data");
                Err(e)
            }
        }
    }

    /// Write the table to `path` as indented JSON. The in-memory table is
    /// never affected, whether or not the write succeeds.
    pub fn save_data(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        match persistence::write_table(path, &self.table) {
            Ok(()) => {
                tracing::info!(path = %path.display(), items = self.table.len(), "saved inventory data");
                Ok(())
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "error saving inventory data");
                Err(e)
            }
        }
    }

    pub fn load_default(&mut self) -> Result<usize, PersistenceError> {
        let path = self.config.data_path.clone();
        self.load_data(path)
    }

    pub fn save_default(&self) -> Result<(), PersistenceError> {
        self.save_data(&self.config.data_path)
    }

    /// Write the header line and one `<item> -> <qty>` line per item.
    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{REPORT_HEADER}")?;
        for (name, qty) in self.table.iter() {
            writeln!(out, "{name} -> {qty}")?;
        }
        Ok(())
    }

    /// Print the report to standard output.
    pub fn print_data(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_report(&mut out)?;
        out.flush()
    }

    fn apply_add(
        &mut self,
        name: ItemName,
        qty: i64,
        log: Option<&mut AuditLog>,
    ) -> DomainResult<StockChange> {
        let change = self.table.increase(name, qty).or_else(|e| reject("add_item", e))?;

        if let Some(log) = log {
            log.record(change.describe());
        }
        tracing::info!(item = %change.name(), qty, on_hand = change.on_hand(), "{}", change.describe());
        Ok(change)
    }

    fn apply_remove(
        &mut self,
        name: &ItemName,
        qty: i64,
        log: Option<&mut AuditLog>,
    ) -> DomainResult<StockChange> {
        let change = match self.table.decrease(name.as_str(), qty) {
            Ok(change) => change,
            Err(DomainError::NotFound(_)) => {
                tracing::warn!(item = %name, qty, "attempted to remove non-existent item");
                return Err(DomainError::not_found(name.as_str()));
            }
            Err(e) => return reject("remove_item", e),
        };

        if let Some(log) = log {
            log.record(change.describe());
        }
        tracing::info!(item = %name, qty, on_hand = change.on_hand(), "{}", change.describe());
        Ok(change)
    }
}

fn reject<T>(operation: &'static str, err: DomainError) -> DomainResult<T> {
    tracing::warn!(operation, error = %err, "invalid input; operation ignored");
    Err(err)
}
