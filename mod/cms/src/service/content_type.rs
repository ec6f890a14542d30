use opencms_core::{now_rfc3339, ListParams, ListResult, ServiceError};
use opencms_sql::Value;

use crate::model::ContentType;

use super::{is_valid_slug, storage, internal, CmsService};

impl CmsService {
    pub fn create_type(
        &self,
        key: String,
        name: String,
        url_segment: String,
    ) -> Result<ContentType, ServiceError> {
        if !is_valid_slug(&key) {
            return Err(ServiceError::Validation(format!("invalid type key '{key}'")));
        }
        if !is_valid_slug(&url_segment) {
            return Err(ServiceError::Validation(format!(
                "invalid URL segment '{url_segment}'"
            )));
        }

        let now = now_rfc3339();
        let record = ContentType {
            key: key.clone(),
            name,
            url_segment: url_segment.clone(),
            create_at: Some(now.clone()),
            update_at: Some(now.clone()),
        };
        let data = serde_json::to_string(&record).map_err(internal)?;

        self.sql
            .exec(
                "INSERT INTO content_types (key, data, name, url_segment, create_at, update_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                &[
                    Value::Text(key.clone()),
                    Value::Text(data),
                    Value::Text(record.name.clone()),
                    Value::Text(url_segment),
                    Value::Text(now.clone()),
                    Value::Text(now),
                ],
            )
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("UNIQUE constraint") {
                    ServiceError::Conflict(format!("content type '{key}' already exists"))
                } else {
                    ServiceError::Storage(msg)
                }
            })?;

        Ok(record)
    }

    pub fn get_type(&self, key: &str) -> Result<ContentType, ServiceError> {
        self.fetch_one(
            "SELECT data FROM content_types WHERE key = ?1",
            &[Value::Text(key.to_string())],
            &format!("content type '{key}'"),
        )
    }

    pub fn list_types(&self, params: &ListParams) -> Result<ListResult<ContentType>, ServiceError> {
        let total = self.count("SELECT COUNT(*) as cnt FROM content_types", &[])?;
        let items = self.fetch_all(
            "SELECT data FROM content_types ORDER BY key LIMIT ?1 OFFSET ?2",
            &[
                Value::Integer(params.limit.min(500) as i64),
                Value::Integer(params.offset as i64),
            ],
        )?;
        Ok(ListResult { items, total })
    }

    pub fn update_type(
        &self,
        key: &str,
        patch: serde_json::Value,
    ) -> Result<ContentType, ServiceError> {
        let current = self.get_type(key)?;
        let updated: ContentType = Self::apply_patch(&current, patch, &["key"])?;

        if !is_valid_slug(&updated.url_segment) {
            return Err(ServiceError::Validation(format!(
                "invalid URL segment '{}'",
                updated.url_segment
            )));
        }

        let data = serde_json::to_string(&updated).map_err(internal)?;
        self.sql
            .exec(
                "UPDATE content_types SET data = ?1, name = ?2, url_segment = ?3, update_at = ?4 \
                 WHERE key = ?5",
                &[
                    Value::Text(data),
                    Value::Text(updated.name.clone()),
                    Value::Text(updated.url_segment.clone()),
                    Value::Text(updated.update_at.clone().unwrap_or_default()),
                    Value::Text(key.to_string()),
                ],
            )
            .map_err(storage)?;

        Ok(updated)
    }

    /// Delete a content type. Refused while live content of that type
    /// exists — archives and content URLs would silently break.
    pub fn delete_type(&self, key: &str) -> Result<(), ServiceError> {
        self.get_type(key)?;

        let live = self.count(
            "SELECT COUNT(*) as cnt FROM contents WHERE type_key = ?1 AND deleted = 0",
            &[Value::Text(key.to_string())],
        )?;
        if live > 0 {
            return Err(ServiceError::Conflict(format!(
                "content type '{key}' still has {live} content item(s)"
            )));
        }

        self.sql
            .exec(
                "DELETE FROM content_types WHERE key = ?1",
                &[Value::Text(key.to_string())],
            )
            .map_err(storage)?;
        Ok(())
    }
}
