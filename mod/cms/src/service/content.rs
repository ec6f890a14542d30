use opencms_core::{now_rfc3339, ListParams, ListResult, ServiceError};
use opencms_sql::Value;

use crate::model::{ContentItem, ContentStatus};

use super::{internal, is_valid_slug, storage, CmsService};

impl CmsService {
    pub fn create_content(
        &self,
        type_key: String,
        slug: String,
        title: String,
        body: String,
        status: Option<ContentStatus>,
    ) -> Result<ContentItem, ServiceError> {
        // The type must be registered before content can point at it.
        self.get_type(&type_key).map_err(|e| match e {
            ServiceError::NotFound(msg) => ServiceError::Validation(msg),
            other => other,
        })?;
        if !is_valid_slug(&slug) {
            return Err(ServiceError::Validation(format!("invalid slug '{slug}'")));
        }

        let status = status.unwrap_or(ContentStatus::Draft);
        let now = now_rfc3339();

        // Two steps: the row assigns the id, then the JSON document (which
        // embeds the id) is written back.
        let id = self
            .sql
            .insert(
                "INSERT INTO contents (type_key, slug, status, create_at, update_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                &[
                    Value::Text(type_key.clone()),
                    Value::Text(slug.clone()),
                    Value::Text(status.as_str().to_string()),
                    Value::Text(now.clone()),
                    Value::Text(now.clone()),
                ],
            )
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("UNIQUE constraint") {
                    ServiceError::Conflict(format!("slug '{slug}' already in use for '{type_key}'"))
                } else {
                    ServiceError::Storage(msg)
                }
            })?;

        let record = ContentItem {
            id,
            type_key,
            slug,
            title,
            body,
            status,
            deleted: false,
            create_at: Some(now.clone()),
            update_at: Some(now),
        };
        self.write_content_data(&record)?;
        Ok(record)
    }

    pub fn get_content(&self, id: i64) -> Result<ContentItem, ServiceError> {
        self.fetch_one(
            "SELECT data FROM contents WHERE id = ?1 AND deleted = 0",
            &[Value::Integer(id)],
            &format!("content {id}"),
        )
    }

    pub fn list_contents(
        &self,
        type_key: Option<&str>,
        status: Option<ContentStatus>,
        params: &ListParams,
    ) -> Result<ListResult<ContentItem>, ServiceError> {
        let mut where_clauses = vec!["deleted = 0".to_string()];
        let mut filters: Vec<Value> = Vec::new();

        if let Some(key) = type_key {
            filters.push(Value::Text(key.to_string()));
            where_clauses.push(format!("type_key = ?{}", filters.len()));
        }
        if let Some(status) = status {
            filters.push(Value::Text(status.as_str().to_string()));
            where_clauses.push(format!("status = ?{}", filters.len()));
        }
        let where_sql = where_clauses.join(" AND ");

        let total = self.count(
            &format!("SELECT COUNT(*) as cnt FROM contents WHERE {where_sql}"),
            &filters,
        )?;

        let mut params_sql = filters.clone();
        params_sql.push(Value::Integer(params.limit.min(500) as i64));
        params_sql.push(Value::Integer(params.offset as i64));
        let items = self.fetch_all(
            &format!(
                "SELECT data FROM contents WHERE {where_sql} ORDER BY id LIMIT ?{} OFFSET ?{}",
                filters.len() + 1,
                filters.len() + 2,
            ),
            &params_sql,
        )?;

        Ok(ListResult { items, total })
    }

    pub fn update_content(
        &self,
        id: i64,
        patch: serde_json::Value,
    ) -> Result<ContentItem, ServiceError> {
        let current = self.get_content(id)?;
        let updated: ContentItem = Self::apply_patch(&current, patch, &["id", "deleted"])?;

        if !is_valid_slug(&updated.slug) {
            return Err(ServiceError::Validation(format!("invalid slug '{}'", updated.slug)));
        }
        if updated.type_key != current.type_key {
            self.get_type(&updated.type_key).map_err(|e| match e {
                ServiceError::NotFound(msg) => ServiceError::Validation(msg),
                other => other,
            })?;
        }

        self.write_content_row(&updated)?;
        Ok(updated)
    }

    pub fn publish_content(&self, id: i64) -> Result<ContentItem, ServiceError> {
        self.set_content_status(id, ContentStatus::Published)
    }

    pub fn unpublish_content(&self, id: i64) -> Result<ContentItem, ServiceError> {
        self.set_content_status(id, ContentStatus::Draft)
    }

    /// Soft delete: the row stays so dangling navigation links remain
    /// diagnosable, but the item disappears from list, lookup and get.
    pub fn delete_content(&self, id: i64) -> Result<(), ServiceError> {
        let mut current = self.get_content(id)?;
        current.deleted = true;
        current.update_at = Some(now_rfc3339());
        self.write_content_row(&current)?;
        Ok(())
    }

    fn set_content_status(
        &self,
        id: i64,
        status: ContentStatus,
    ) -> Result<ContentItem, ServiceError> {
        let mut current = self.get_content(id)?;
        current.status = status;
        current.update_at = Some(now_rfc3339());
        self.write_content_row(&current)?;
        Ok(current)
    }

    fn write_content_row(&self, record: &ContentItem) -> Result<(), ServiceError> {
        let data = serde_json::to_string(record).map_err(internal)?;
        let affected = self
            .sql
            .exec(
                "UPDATE contents SET data = ?1, type_key = ?2, slug = ?3, status = ?4, \
                 deleted = ?5, update_at = ?6 WHERE id = ?7",
                &[
                    Value::Text(data),
                    Value::Text(record.type_key.clone()),
                    Value::Text(record.slug.clone()),
                    Value::Text(record.status.as_str().to_string()),
                    Value::Integer(record.deleted as i64),
                    Value::Text(record.update_at.clone().unwrap_or_default()),
                    Value::Integer(record.id),
                ],
            )
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("UNIQUE constraint") {
                    ServiceError::Conflict(format!(
                        "slug '{}' already in use for '{}'",
                        record.slug, record.type_key
                    ))
                } else {
                    ServiceError::Storage(msg)
                }
            })?;
        if affected == 0 {
            return Err(ServiceError::NotFound(format!("content {} not found", record.id)));
        }
        Ok(())
    }

    fn write_content_data(&self, record: &ContentItem) -> Result<(), ServiceError> {
        let data = serde_json::to_string(record).map_err(internal)?;
        self.sql
            .exec(
                "UPDATE contents SET data = ?1 WHERE id = ?2",
                &[Value::Text(data), Value::Integer(record.id)],
            )
            .map_err(storage)?;
        Ok(())
    }
}
