use stockkeep_core::ItemName;

/// Result of a successful stock mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockChange {
    /// Stock was added; `on_hand` is the quantity after the addition.
    Added { name: ItemName, qty: i64, on_hand: i64 },
    /// Stock was removed and some remains.
    Reduced { name: ItemName, qty: i64, on_hand: i64 },
    /// Removal drove the quantity to zero or below; the entry is gone.
    Depleted { name: ItemName, qty: i64 },
}

impl StockChange {
    pub fn name(&self) -> &ItemName {
        match self {
            StockChange::Added { name, .. }
            | StockChange::Reduced { name, .. }
            | StockChange::Depleted { name, .. } => name,
        }
    }

    /// Quantity requested by the operation.
    pub fn qty(&self) -> i64 {
        match self {
            StockChange::Added { qty, .. }
            | StockChange::Reduced { qty, .. }
            | StockChange::Depleted { qty, .. } => *qty,
        }
    }

    /// Quantity left in stock after the change (zero once depleted).
    pub fn on_hand(&self) -> i64 {
        match self {
            StockChange::Added { on_hand, .. } | StockChange::Reduced { on_hand, .. } => *on_hand,
            StockChange::Depleted { .. } => 0,
        }
    }

    pub fn is_depleted(&self) -> bool {
        matches!(self, StockChange::Depleted { .. })
    }

    /// Human-readable description used for audit records.
    pub fn describe(&self) -> String {
        match self {
            StockChange::Added { name, qty, .. } => format!("Added {qty} of {name}"),
            StockChange::Reduced { name, qty, .. } => format!("Removed {qty} of {name}"),
            StockChange::Depleted { name, .. } => {
                format!("Removed item '{name}' completely from stock")
            }
        }
    }
}
