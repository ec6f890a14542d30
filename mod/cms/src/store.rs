use std::sync::Arc;

use tracing::warn;

use opencms_core::ServiceError;
use opencms_kv::KVStore;

use crate::model::NavRecord;

/// Key prefix for navigation records. Ids are zero-padded so a prefix scan
/// returns records in id order.
const ITEM_PREFIX: &str = "nav:item:";

/// Key holding the last allocated record id.
const SEQ_KEY: &str = "nav:seq";

fn item_key(id: i64) -> String {
    format!("{ITEM_PREFIX}{id:020}")
}

/// Persistent storage for navigation records: JSON documents in the KV
/// store, one per record, keyed by id.
pub struct NavStore {
    kv: Arc<dyn KVStore>,
}

impl NavStore {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self { kv }
    }

    /// Allocate the next record id (monotonic counter, starts at 1).
    pub fn next_id(&self) -> Result<i64, ServiceError> {
        let last = match self
            .kv
            .get(SEQ_KEY)
            .map_err(|e| ServiceError::Storage(e.to_string()))?
        {
            Some(bytes) => String::from_utf8_lossy(&bytes).parse::<i64>().unwrap_or(0),
            None => 0,
        };
        let next = last + 1;
        self.kv
            .set(SEQ_KEY, next.to_string().as_bytes())
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(next)
    }

    /// Load the full flat snapshot, in id order.
    ///
    /// A record that no longer decodes is skipped with a warning rather
    /// than failing the whole snapshot.
    pub fn list_all(&self) -> Result<Vec<NavRecord>, ServiceError> {
        let entries = self
            .kv
            .scan(ITEM_PREFIX)
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let mut records = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            match serde_json::from_slice::<NavRecord>(&value) {
                Ok(record) => records.push(record),
                Err(e) => warn!("skipping undecodable navigation record {key}: {e}"),
            }
        }
        Ok(records)
    }

    pub fn get(&self, id: i64) -> Result<NavRecord, ServiceError> {
        let bytes = self
            .kv
            .get(&item_key(id))
            .map_err(|e| ServiceError::Storage(e.to_string()))?
            .ok_or_else(|| ServiceError::NotFound(format!("navigation item {id} not found")))?;
        serde_json::from_slice(&bytes).map_err(|e| ServiceError::Internal(e.to_string()))
    }

    pub fn save(&self, record: &NavRecord) -> Result<(), ServiceError> {
        let bytes = serde_json::to_vec(record).map_err(|e| ServiceError::Internal(e.to_string()))?;
        self.kv
            .set(&item_key(record.id), &bytes)
            .map_err(|e| ServiceError::Storage(e.to_string()))
    }

    pub fn delete(&self, id: i64) -> Result<(), ServiceError> {
        // Existence check first so a delete of a missing id is a 404.
        self.get(id)?;
        self.kv
            .delete(&item_key(id))
            .map_err(|e| ServiceError::Storage(e.to_string()))
    }
}
