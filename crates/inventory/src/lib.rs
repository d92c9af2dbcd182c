//! Inventory tracking: an owned stock table with add/remove/query operations,
//! JSON file persistence, and a caller-supplied audit trail.
//!
//! Nothing here panics on bad input. Rejected calls log a warning and return
//! an error the caller is free to ignore.

pub mod audit;
pub mod change;
pub mod config;
pub mod input;
pub mod persistence;
pub mod store;
pub mod table;

pub use audit::{AuditEntry, AuditLog};
pub use change::StockChange;
pub use config::{DEFAULT_DATA_PATH, DEFAULT_LOW_STOCK_THRESHOLD, StoreConfig};
pub use input::StockRequest;
pub use persistence::{LoadedTable, PersistenceError};
pub use store::{InventoryStore, REPORT_HEADER};
pub use table::StockTable;
