pub mod content;
pub mod content_type;
pub mod navigation;
pub mod schema;
pub mod term;

use std::fmt::Display;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use opencms_core::{merge_patch, now_rfc3339, ServiceError};
use opencms_kv::KVStore;
use opencms_sql::{SQLStore, Value};

use crate::store::NavStore;

/// CMS service — holds the storage backends and provides business logic.
///
/// Content types, content items and terms live in SQL; navigation records
/// live in the KV store (see [`NavStore`]). The service also implements
/// the engine's lookup traits (see `service::navigation`).
pub struct CmsService {
    pub(crate) sql: Arc<dyn SQLStore>,
    pub(crate) nav: NavStore,
}

impl CmsService {
    pub fn new(sql: Arc<dyn SQLStore>, kv: Arc<dyn KVStore>) -> Result<Self, ServiceError> {
        schema::init_schema(sql.as_ref())?;
        Ok(Self {
            sql,
            nav: NavStore::new(kv),
        })
    }

    // ── Generic SQL helpers ──

    /// Fetch one row's `data` column and deserialize it.
    pub(crate) fn fetch_one<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[Value],
        what: &str,
    ) -> Result<T, ServiceError> {
        let rows = self.sql.query(sql, params).map_err(storage)?;
        let row = rows
            .first()
            .ok_or_else(|| ServiceError::NotFound(format!("{what} not found")))?;
        let data = row
            .get_str("data")
            .ok_or_else(|| ServiceError::Internal("missing data column".into()))?;
        serde_json::from_str(data).map_err(internal)
    }

    /// Fetch every row's `data` column and deserialize each.
    pub(crate) fn fetch_all<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Vec<T>, ServiceError> {
        let rows = self.sql.query(sql, params).map_err(storage)?;
        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            let data = row
                .get_str("data")
                .ok_or_else(|| ServiceError::Internal("missing data column".into()))?;
            items.push(serde_json::from_str(data).map_err(internal)?);
        }
        Ok(items)
    }

    /// Count rows for a filter.
    pub(crate) fn count(&self, sql: &str, params: &[Value]) -> Result<usize, ServiceError> {
        let rows = self.sql.query(sql, params).map_err(storage)?;
        Ok(rows.first().and_then(|r| r.get_i64("cnt")).unwrap_or(0) as usize)
    }

    /// Apply a JSON merge-patch to a record, protecting immutable fields
    /// and stamping `updateAt`.
    pub(crate) fn apply_patch<T: Serialize + DeserializeOwned>(
        current: &T,
        patch: serde_json::Value,
        immutable: &[&str],
    ) -> Result<T, ServiceError> {
        let mut json = serde_json::to_value(current).map_err(internal)?;

        let mut patch = patch;
        if let Some(obj) = patch.as_object_mut() {
            for field in immutable {
                obj.remove(*field);
            }
            obj.remove("createAt");
            obj.insert("updateAt".into(), serde_json::json!(now_rfc3339()));
        } else {
            return Err(ServiceError::Validation("patch must be a JSON object".into()));
        }

        merge_patch(&mut json, &patch);
        serde_json::from_value(json)
            .map_err(|e| ServiceError::Validation(format!("patched record is invalid: {e}")))
    }
}

pub(crate) fn storage(e: impl Display) -> ServiceError {
    ServiceError::Storage(e.to_string())
}

pub(crate) fn internal(e: impl Display) -> ServiceError {
    ServiceError::Internal(e.to_string())
}

/// Slugs and type keys: non-empty, lowercase ASCII letters, digits, dashes.
pub(crate) fn is_valid_slug(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_validation() {
        assert!(is_valid_slug("about-us"));
        assert!(is_valid_slug("page2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("About"));
        assert!(!is_valid_slug("with space"));
        assert!(!is_valid_slug("caf\u{e9}"));
    }
}
