//! JSON file persistence for the stock table.
//!
//! On disk the table is a single JSON object mapping item names to integer
//! quantities, indented with four spaces.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

use crate::table::StockTable;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed inventory file {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode inventory: {0}")]
    Encode(#[source] serde_json::Error),
}

impl PersistenceError {
    pub fn path(&self) -> Option<&Path> {
        match self {
            PersistenceError::Read { path, .. }
            | PersistenceError::Write { path, .. }
            | PersistenceError::Decode { path, .. } => Some(path),
            PersistenceError::Encode(_) => None,
        }
    }
}

/// Table decoded from disk, plus entries that had to be discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTable {
    pub table: StockTable,
    /// Raw keys of skipped entries (empty name or non-positive quantity).
    pub dropped: Vec<String>,
}

/// Read the table stored at `path`.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn read_table(path: &Path) -> Result<Option<LoadedTable>, PersistenceError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(PersistenceError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let quantities: BTreeMap<String, i64> =
        serde_json::from_str(&raw).map_err(|source| PersistenceError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    let (table, dropped) = StockTable::from_quantities(quantities);
    Ok(Some(LoadedTable { table, dropped }))
}

/// Serialize `table` as four-space indented JSON.
pub fn encode_table(table: &StockTable) -> Result<Vec<u8>, PersistenceError> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    table.serialize(&mut ser).map_err(PersistenceError::Encode)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Write `table` to `path`.
///
/// The bytes go to a sibling `.tmp` file first and are renamed into place, so
/// a failed write leaves any previous file intact.
pub fn write_table(path: &Path, table: &StockTable) -> Result<(), PersistenceError> {
    let bytes = encode_table(table)?;
    let tmp = tmp_path(path);

    let written = write_file(&tmp, &bytes).and_then(|()| fs::rename(&tmp, path));
    if let Err(source) = written {
        let _ = fs::remove_file(&tmp);
        return Err(PersistenceError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(".tmp");
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockkeep_core::ItemName;

    fn table(pairs: &[(&str, i64)]) -> StockTable {
        StockTable::from_quantities(pairs.iter().map(|(n, q)| (n.to_string(), *q))).0
    }

    #[test]
    fn encodes_with_four_space_indent() {
        let text = String::from_utf8(encode_table(&table(&[("apple", 7), ("banana", 2)])).unwrap()).unwrap();
        assert_eq!(text, "{\n    \"apple\": 7,\n    \"banana\": 2\n}\n");
    }

    #[test]
    fn encodes_empty_table_as_empty_object() {
        let text = String::from_utf8(encode_table(&StockTable::new()).unwrap()).unwrap();
        assert_eq!(text, "{}\n");
    }

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_table(&dir.path().join("absent.json")).unwrap().is_none());
    }

    #[test]
    fn non_integer_values_are_decode_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        fs::write(&path, r#"{"apple": "ten"}"#).unwrap();

        let err = read_table(&path).unwrap_err();
        assert!(matches!(err, PersistenceError::Decode { .. }));
        assert_eq!(err.path(), Some(path.as_path()));
    }

    #[test]
    fn non_positive_entries_are_reported_as_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        fs::write(&path, r#"{"apple": 4, "ghost": 0}"#).unwrap();

        let loaded = read_table(&path).unwrap().unwrap();
        assert_eq!(loaded.table.get("apple"), 4);
        assert_eq!(loaded.dropped, vec!["ghost".to_string()]);
    }

    #[test]
    fn whitespace_key_loads_and_empty_key_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        fs::write(&path, r#"{"apple": 2, " ": 1, "": 9}"#).unwrap();

        let loaded = read_table(&path).unwrap().unwrap();
        assert_eq!(loaded.table.get("apple"), 2);
        assert_eq!(loaded.table.get(" "), 1);
        assert_eq!(loaded.dropped, vec![String::new()]);
    }

    #[test]
    fn written_names_decode_back_to_item_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        write_table(&path, &table(&[(" ", 3)])).unwrap();

        let loaded = read_table(&path).unwrap().unwrap();
        let names: Vec<&ItemName> = loaded.table.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec![&ItemName::new(" ").unwrap()]);
    }

    #[test]
    fn write_leaves_no_tmp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        write_table(&path, &table(&[("apple", 1)])).unwrap();

        assert!(path.exists());
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("inventory.json");

        let err = write_table(&path, &StockTable::new()).unwrap_err();
        assert!(matches!(err, PersistenceError::Write { .. }));
    }
}
