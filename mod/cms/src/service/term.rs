use opencms_core::{now_rfc3339, ListParams, ListResult, ServiceError};
use opencms_sql::Value;

use crate::model::Term;

use super::{internal, is_valid_slug, storage, CmsService};

impl CmsService {
    pub fn create_term(
        &self,
        type_key: String,
        slug: String,
        name: String,
    ) -> Result<Term, ServiceError> {
        if !is_valid_slug(&type_key) {
            return Err(ServiceError::Validation(format!("invalid taxonomy '{type_key}'")));
        }
        if !is_valid_slug(&slug) {
            return Err(ServiceError::Validation(format!("invalid slug '{slug}'")));
        }

        let now = now_rfc3339();
        let id = self
            .sql
            .insert(
                "INSERT INTO terms (type_key, slug, create_at, update_at) VALUES (?1, ?2, ?3, ?4)",
                &[
                    Value::Text(type_key.clone()),
                    Value::Text(slug.clone()),
                    Value::Text(now.clone()),
                    Value::Text(now.clone()),
                ],
            )
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("UNIQUE constraint") {
                    ServiceError::Conflict(format!("term '{slug}' already exists in '{type_key}'"))
                } else {
                    ServiceError::Storage(msg)
                }
            })?;

        let record = Term {
            id,
            type_key,
            slug,
            name,
            create_at: Some(now.clone()),
            update_at: Some(now),
        };
        let data = serde_json::to_string(&record).map_err(internal)?;
        self.sql
            .exec(
                "UPDATE terms SET data = ?1 WHERE id = ?2",
                &[Value::Text(data), Value::Integer(record.id)],
            )
            .map_err(storage)?;
        Ok(record)
    }

    pub fn get_term(&self, id: i64) -> Result<Term, ServiceError> {
        self.fetch_one(
            "SELECT data FROM terms WHERE id = ?1",
            &[Value::Integer(id)],
            &format!("term {id}"),
        )
    }

    pub fn list_terms(
        &self,
        type_key: Option<&str>,
        params: &ListParams,
    ) -> Result<ListResult<Term>, ServiceError> {
        let (where_sql, filters): (&str, Vec<Value>) = match type_key {
            Some(key) => (" WHERE type_key = ?1", vec![Value::Text(key.to_string())]),
            None => ("", Vec::new()),
        };

        let total = self.count(
            &format!("SELECT COUNT(*) as cnt FROM terms{where_sql}"),
            &filters,
        )?;

        let mut params_sql = filters.clone();
        params_sql.push(Value::Integer(params.limit.min(500) as i64));
        params_sql.push(Value::Integer(params.offset as i64));
        let items = self.fetch_all(
            &format!(
                "SELECT data FROM terms{where_sql} ORDER BY id LIMIT ?{} OFFSET ?{}",
                filters.len() + 1,
                filters.len() + 2,
            ),
            &params_sql,
        )?;

        Ok(ListResult { items, total })
    }

    pub fn update_term(&self, id: i64, patch: serde_json::Value) -> Result<Term, ServiceError> {
        let current = self.get_term(id)?;
        let updated: Term = Self::apply_patch(&current, patch, &["id"])?;

        if !is_valid_slug(&updated.type_key) || !is_valid_slug(&updated.slug) {
            return Err(ServiceError::Validation("invalid taxonomy or slug".into()));
        }

        let data = serde_json::to_string(&updated).map_err(internal)?;
        self.sql
            .exec(
                "UPDATE terms SET data = ?1, type_key = ?2, slug = ?3, update_at = ?4 WHERE id = ?5",
                &[
                    Value::Text(data),
                    Value::Text(updated.type_key.clone()),
                    Value::Text(updated.slug.clone()),
                    Value::Text(updated.update_at.clone().unwrap_or_default()),
                    Value::Integer(id),
                ],
            )
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("UNIQUE constraint") {
                    ServiceError::Conflict(format!(
                        "term '{}' already exists in '{}'",
                        updated.slug, updated.type_key
                    ))
                } else {
                    ServiceError::Storage(msg)
                }
            })?;
        Ok(updated)
    }

    pub fn delete_term(&self, id: i64) -> Result<(), ServiceError> {
        let affected = self
            .sql
            .exec("DELETE FROM terms WHERE id = ?1", &[Value::Integer(id)])
            .map_err(storage)?;
        if affected == 0 {
            return Err(ServiceError::NotFound(format!("term {id} not found")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests_support::make_service;
    use opencms_core::{ListParams, ServiceError};

    #[test]
    fn create_get_list_delete() {
        let (_dir, svc) = make_service();
        let news = svc.create_term("category".into(), "news".into(), "News".into()).unwrap();
        svc.create_term("tag".into(), "rust".into(), "Rust".into()).unwrap();

        assert_eq!(svc.get_term(news.id).unwrap().slug, "news");

        let categories = svc.list_terms(Some("category"), &ListParams::default()).unwrap();
        assert_eq!(categories.total, 1);

        svc.delete_term(news.id).unwrap();
        assert!(matches!(svc.get_term(news.id), Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete_term(news.id), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn duplicate_slug_per_taxonomy_conflicts() {
        let (_dir, svc) = make_service();
        svc.create_term("category".into(), "news".into(), "News".into()).unwrap();
        // Same slug in a different taxonomy is fine.
        svc.create_term("tag".into(), "news".into(), "News tag".into()).unwrap();

        let err = svc.create_term("category".into(), "news".into(), "Dup".into());
        assert!(matches!(err, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn update_revalidates_slug() {
        let (_dir, svc) = make_service();
        let term = svc.create_term("category".into(), "news".into(), "News".into()).unwrap();

        let err = svc.update_term(term.id, serde_json::json!({"slug": "Bad Slug"}));
        assert!(matches!(err, Err(ServiceError::Validation(_))));

        let ok = svc.update_term(term.id, serde_json::json!({"name": "Latest news"})).unwrap();
        assert_eq!(ok.name, "Latest news");
    }
}
