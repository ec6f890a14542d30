use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use opencms_core::{ListParams, ListResult};

use crate::model::Term;

use super::{ok_json, ApiError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/terms", post(create_term).get(list_terms))
        .route("/terms/{id}", get(get_term).patch(update_term).delete(delete_term))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTermBody {
    type_key: String,
    slug: String,
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TermFilter {
    type_key: Option<String>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl TermFilter {
    fn params(&self) -> ListParams {
        let mut params = ListParams::default();
        if let Some(limit) = self.limit {
            params.limit = limit;
        }
        if let Some(offset) = self.offset {
            params.offset = offset;
        }
        params
    }
}

async fn create_term(
    State(svc): State<AppState>,
    Json(body): Json<CreateTermBody>,
) -> Result<Json<Term>, ApiError> {
    ok_json(svc.create_term(body.type_key, body.slug, body.name))
}

async fn get_term(
    State(svc): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Term>, ApiError> {
    ok_json(svc.get_term(id))
}

async fn list_terms(
    State(svc): State<AppState>,
    Query(filter): Query<TermFilter>,
) -> Result<Json<ListResult<Term>>, ApiError> {
    ok_json(svc.list_terms(filter.type_key.as_deref(), &filter.params()))
}

async fn update_term(
    State(svc): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<serde_json::Value>,
) -> Result<Json<Term>, ApiError> {
    ok_json(svc.update_term(id, patch))
}

async fn delete_term(
    State(svc): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    svc.delete_term(id).map_err(ApiError::from)?;
    Ok(Json(serde_json::json!({"ok": true})))
}
