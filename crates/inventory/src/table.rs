use std::collections::BTreeMap;

use serde::Serialize;

use stockkeep_core::{DomainError, DomainResult, ItemName};

use crate::change::StockChange;

/// Item name -> quantity on hand.
///
/// Every entry holds a strictly positive quantity; an entry whose quantity
/// would fall to zero or below is removed instead. Iteration is ordered by
/// item name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StockTable {
    entries: BTreeMap<ItemName, i64>,
}

impl StockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from decoded `(name, quantity)` pairs.
    ///
    /// Entries that cannot be held (empty name, non-positive quantity) are
    /// skipped and their raw names returned so the caller can report them.
    pub fn from_quantities(
        quantities: impl IntoIterator<Item = (String, i64)>,
    ) -> (Self, Vec<String>) {
        let mut entries = BTreeMap::new();
        let mut dropped = Vec::new();
        for (raw, qty) in quantities {
            match ItemName::new(raw.as_str()) {
                Ok(name) if qty > 0 => {
                    entries.insert(name, qty);
                }
                _ => dropped.push(raw),
            }
        }
        (Self { entries }, dropped)
    }

    /// Quantity on hand, or 0 for unknown items.
    pub fn get(&self, name: &str) -> i64 {
        self.entries.get(name).copied().unwrap_or(0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemName, i64)> + '_ {
        self.entries.iter().map(|(name, qty)| (name, *qty))
    }

    /// Names whose quantity is strictly below `threshold`.
    pub fn below(&self, threshold: i64) -> impl Iterator<Item = &ItemName> + '_ {
        self.entries
            .iter()
            .filter(move |(_, qty)| **qty < threshold)
            .map(|(name, _)| name)
    }

    /// Add `qty` units of `name`, creating the entry if needed.
    pub fn increase(&mut self, name: ItemName, qty: i64) -> DomainResult<StockChange> {
        if qty <= 0 {
            return Err(DomainError::validation("quantity to add must be positive"));
        }

        let current = self.get(name.as_str());
        let on_hand = current
            .checked_add(qty)
            .ok_or_else(|| DomainError::validation("quantity overflow"))?;

        self.entries.insert(name.clone(), on_hand);
        Ok(StockChange::Added { name, qty, on_hand })
    }

    /// Remove `qty` units of `name`.
    ///
    /// Absence is checked before anything is touched. If the remaining
    /// quantity would be zero or negative the entry is deleted. Removing 0
    /// units of a stocked item leaves it as is.
    pub fn decrease(&mut self, name: &str, qty: i64) -> DomainResult<StockChange> {
        if qty < 0 {
            return Err(DomainError::validation("quantity to remove cannot be negative"));
        }

        let Some((key, current)) = self.entries.get_key_value(name) else {
            return Err(DomainError::not_found(name));
        };
        let name = key.clone();
        let remaining = current.saturating_sub(qty);

        if remaining <= 0 {
            self.entries.remove(name.as_str());
            Ok(StockChange::Depleted { name, qty })
        } else {
            self.entries.insert(name.clone(), remaining);
            Ok(StockChange::Reduced { name, qty, on_hand: remaining })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn name(raw: &str) -> ItemName {
        ItemName::new(raw).unwrap()
    }

    #[test]
    fn increase_creates_then_accumulates() {
        let mut table = StockTable::new();
        table.increase(name("apple"), 4).unwrap();
        let change = table.increase(name("apple"), 6).unwrap();

        assert_eq!(change.on_hand(), 10);
        assert_eq!(table.get("apple"), 10);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn increase_rejects_non_positive_quantities() {
        let mut table = StockTable::new();
        assert!(table.increase(name("apple"), 0).unwrap_err().is_validation());
        assert!(table.increase(name("apple"), -2).unwrap_err().is_validation());
        assert!(table.is_empty());
    }

    #[test]
    fn increase_rejects_overflow_without_mutating() {
        let mut table = StockTable::new();
        table.increase(name("apple"), i64::MAX).unwrap();

        let err = table.increase(name("apple"), 1).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(table.get("apple"), i64::MAX);
    }

    #[test]
    fn decrease_missing_item_is_not_found() {
        let mut table = StockTable::new();
        let err = table.decrease("orange", 1).unwrap_err();
        assert_eq!(err, DomainError::not_found("orange"));
        assert!(table.is_empty());
    }

    #[test]
    fn decrease_to_zero_deletes_entry() {
        let mut table = StockTable::new();
        table.increase(name("apple"), 10).unwrap();

        let change = table.decrease("apple", 10).unwrap();
        assert!(change.is_depleted());
        assert!(!table.contains("apple"));
        assert_eq!(table.get("apple"), 0);
    }

    #[test]
    fn decrease_past_zero_deletes_entry() {
        let mut table = StockTable::new();
        table.increase(name("apple"), 2).unwrap();

        assert!(table.decrease("apple", i64::MAX).unwrap().is_depleted());
        assert!(table.is_empty());
    }

    fn quantities(pairs: &[(&str, i64)]) -> Vec<(String, i64)> {
        pairs.iter().map(|(n, q)| (n.to_string(), *q)).collect()
    }

    #[test]
    fn from_quantities_drops_non_positive_entries() {
        let (table, dropped) =
            StockTable::from_quantities(quantities(&[("apple", 3), ("ghost", 0), ("debt", -4)]));

        assert_eq!(table.len(), 1);
        assert_eq!(dropped, vec!["ghost".to_string(), "debt".to_string()]);
    }

    #[test]
    fn from_quantities_skips_empty_names_only() {
        let (table, dropped) =
            StockTable::from_quantities(quantities(&[("apple", 2), ("", 5), (" ", 1)]));

        assert_eq!(table.get("apple"), 2);
        assert_eq!(table.get(" "), 1);
        assert_eq!(dropped, vec![String::new()]);
    }

    #[test]
    fn decrease_by_zero_keeps_entry() {
        let mut table = StockTable::new();
        table.increase(name("apple"), 4).unwrap();

        let change = table.decrease("apple", 0).unwrap();
        assert_eq!(change, StockChange::Reduced { name: name("apple"), qty: 0, on_hand: 4 });
        assert_eq!(table.get("apple"), 4);
    }

    #[test]
    fn decrease_rejects_negative_quantity() {
        let mut table = StockTable::new();
        table.increase(name("apple"), 4).unwrap();

        assert!(table.decrease("apple", -1).unwrap_err().is_validation());
        assert_eq!(table.get("apple"), 4);
    }

    #[test]
    fn below_is_strict_and_ordered() {
        let (table, _) =
            StockTable::from_quantities(quantities(&[("grape", 7), ("banana", 2), ("apple", 5)]));

        let low: Vec<&str> = table.below(6).map(ItemName::as_str).collect();
        assert_eq!(low, vec!["apple", "banana"]);
        assert_eq!(table.below(2).count(), 0);
    }

    proptest! {
        /// Property: no sequence of mutations leaves a non-positive entry behind.
        #[test]
        fn entries_stay_positive(
            ops in prop::collection::vec((any::<bool>(), 0usize..3, 1i64..20), 0..64)
        ) {
            let names = ["apple", "banana", "grape"];
            let mut table = StockTable::new();

            for (is_add, idx, qty) in ops {
                if is_add {
                    table.increase(name(names[idx]), qty).unwrap();
                } else {
                    let _ = table.decrease(names[idx], qty);
                }
                prop_assert!(table.iter().all(|(_, q)| q > 0));
            }
        }
    }
}
