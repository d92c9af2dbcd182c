//! Caller-owned audit trail of stock mutations.
//!
//! The log lives only in memory; it is never written to the inventory file.

use chrono::{DateTime, Utc};
/// One timestamped mutation record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub recorded_at: DateTime<Utc>,
    pub message: String,
}

impl core::fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.recorded_at.format("%Y-%m-%d %H:%M:%S%.6f"),
            self.message
        )
    }
}

/// Append-only, ordered list of audit entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record stamped with the current time.
    pub fn record(&mut self, message: impl Into<String>) {
        self.record_at(Utc::now(), message);
    }

    pub fn record_at(&mut self, recorded_at: DateTime<Utc>, message: impl Into<String>) {
        self.entries.push(AuditEntry {
            recorded_at,
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &AuditEntry> + '_ {
        self.entries.iter()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.message.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
