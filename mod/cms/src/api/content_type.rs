use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use opencms_core::{ListParams, ListResult};

use crate::model::ContentType;

use super::{ok_json, ApiError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/types", post(create_type).get(list_types))
        .route("/types/{key}", get(get_type).patch(update_type).delete(delete_type))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTypeBody {
    key: String,
    name: String,
    url_segment: String,
}

async fn create_type(
    State(svc): State<AppState>,
    Json(body): Json<CreateTypeBody>,
) -> Result<Json<ContentType>, ApiError> {
    ok_json(svc.create_type(body.key, body.name, body.url_segment))
}

async fn get_type(
    State(svc): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ContentType>, ApiError> {
    ok_json(svc.get_type(&key))
}

async fn list_types(
    State(svc): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResult<ContentType>>, ApiError> {
    ok_json(svc.list_types(&params))
}

async fn update_type(
    State(svc): State<AppState>,
    Path(key): Path<String>,
    Json(patch): Json<serde_json::Value>,
) -> Result<Json<ContentType>, ApiError> {
    ok_json(svc.update_type(&key, patch))
}

async fn delete_type(
    State(svc): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    svc.delete_type(&key).map_err(ApiError::from)?;
    Ok(Json(serde_json::json!({"ok": true})))
}
