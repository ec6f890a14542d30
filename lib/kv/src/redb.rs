use std::fmt::Display;
use std::path::Path;

use redb::{Database, TableDefinition};

use crate::error::KVError;
use crate::traits::KVStore;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("opencms");

fn storage(e: impl Display) -> KVError {
    KVError::Storage(e.to_string())
}

/// RedbStore is a KVStore implementation backed by redb, a pure-Rust
/// embedded key-value database.
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open or create a redb database at the given path.
    pub fn open(path: &Path) -> Result<Self, KVError> {
        let db = Database::create(path).map_err(storage)?;

        // First open of a fresh file: make sure the table exists so that
        // read transactions don't fail on an empty database.
        let write_txn = db.begin_write().map_err(storage)?;
        {
            let _table = write_txn.open_table(TABLE).map_err(storage)?;
        }
        write_txn.commit().map_err(storage)?;

        Ok(Self { db })
    }
}

impl KVStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        let read_txn = self.db.begin_read().map_err(storage)?;
        let table = read_txn.open_table(TABLE).map_err(storage)?;
        let value = table.get(key).map_err(storage)?;
        Ok(value.map(|v| v.value().to_vec()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(storage)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(storage)?;
            table.insert(key, value).map_err(storage)?;
        }
        write_txn.commit().map_err(storage)
    }

    fn delete(&self, key: &str) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(storage)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(storage)?;
            table.remove(key).map_err(storage)?;
        }
        write_txn.commit().map_err(storage)
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError> {
        let read_txn = self.db.begin_read().map_err(storage)?;
        let table = read_txn.open_table(TABLE).map_err(storage)?;

        let mut results = Vec::new();
        for entry in table.range(prefix..).map_err(storage)? {
            let (key, value) = entry.map_err(storage)?;
            let key = key.value().to_string();
            if !key.starts_with(prefix) {
                break;
            }
            results.push((key, value.value().to_vec()));
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_store() -> (tempfile::TempDir, RedbStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = RedbStore::open(&dir.path().join("kv.redb")).unwrap();
        (dir, store)
    }

    #[test]
    fn set_get_delete() {
        let (_dir, store) = open_store();
        assert!(store.get("nav:item:1").unwrap().is_none());

        store.set("nav:item:1", b"{}").unwrap();
        assert_eq!(store.get("nav:item:1").unwrap().unwrap(), b"{}");

        store.delete("nav:item:1").unwrap();
        assert!(store.get("nav:item:1").unwrap().is_none());

        // Deleting again is fine.
        store.delete("nav:item:1").unwrap();
    }

    #[test]
    fn overwrite_replaces_value() {
        let (_dir, store) = open_store();
        store.set("nav:seq", b"1").unwrap();
        store.set("nav:seq", b"2").unwrap();
        assert_eq!(store.get("nav:seq").unwrap().unwrap(), b"2");
    }

    #[test]
    fn scan_is_prefix_bounded_and_sorted() {
        let (_dir, store) = open_store();
        store.set("nav:item:02", b"b").unwrap();
        store.set("nav:item:01", b"a").unwrap();
        store.set("nav:seq", b"2").unwrap();
        store.set("other:x", b"z").unwrap();

        let entries = store.scan("nav:item:").unwrap();
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["nav:item:01", "nav:item:02"]);
    }

    #[test]
    fn scan_empty_prefix_returns_everything() {
        let (_dir, store) = open_store();
        store.set("a", b"1").unwrap();
        store.set("b", b"2").unwrap();
        assert_eq!(store.scan("").unwrap().len(), 2);
    }
}
