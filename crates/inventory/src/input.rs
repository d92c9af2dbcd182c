//! Loosely-typed request boundary.
//!
//! Requests arriving as JSON values (scripts, decoded payloads) are checked
//! here before they reach the typed store API: the name must be a string and
//! the quantity an integer.

use serde_json::Value;

use stockkeep_core::{DomainError, DomainResult, ItemName};

/// A validated `(item, quantity)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockRequest {
    pub name: ItemName,
    pub qty: i64,
}

impl StockRequest {
    pub fn from_values(name: &Value, qty: &Value) -> DomainResult<Self> {
        Ok(Self {
            name: item_name(name)?,
            qty: quantity(qty)?,
        })
    }
}

pub fn item_name(value: &Value) -> DomainResult<ItemName> {
    match value {
        Value::String(raw) => ItemName::new(raw.as_str()),
        other => Err(DomainError::validation(format!(
            "item name must be a string, got {}",
            kind(other)
        ))),
    }
}

pub fn quantity(value: &Value) -> DomainResult<i64> {
    value.as_i64().ok_or_else(|| {
        DomainError::validation(format!("quantity must be an integer, got {}", kind(value)))
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "out-of-range integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
