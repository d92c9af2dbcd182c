//! Demonstration run: a fixed sequence of inventory operations.

use anyhow::Context;
use stockkeep_inventory::{AuditLog, InventoryStore, StoreConfig};

fn main() -> anyhow::Result<()> {
    stockkeep_observability::init();

    let mut store = InventoryStore::with_config(StoreConfig::default());
    let mut audit = AuditLog::new();

    // Rejected calls are already logged by the store; the demo carries on.
    let _ = store.add_item("apple", 10, Some(&mut audit));
    let _ = store.add_item("banana", 2, Some(&mut audit));
    let _ = store.add_item("grape", 7, Some(&mut audit));
    let _ = store.remove_item("apple", 3, Some(&mut audit));
    let _ = store.remove_item("orange", 1, Some(&mut audit));

    println!("Apple stock: {}", store.get_qty("apple"));
    println!("Low items: {:?}", store.low_items());

    let _ = store.save_default();
    let _ = store.load_default();
    store.print_data().context("failed to write inventory report")?;

    tracing::debug!(records = audit.len(), "audit trail complete");
    for entry in audit.iter() {
        tracing::debug!("{entry}");
    }

    Ok(())
}
