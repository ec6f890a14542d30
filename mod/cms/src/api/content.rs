use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use opencms_core::{ListParams, ListResult};

use crate::model::{ContentItem, ContentStatus};

use super::{ok_json, ApiError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/contents", post(create_content).get(list_contents))
        .route(
            "/contents/{id}",
            get(get_content).patch(update_content).delete(delete_content),
        )
        .route("/contents/{id}/publish", post(publish_content))
        .route("/contents/{id}/unpublish", post(unpublish_content))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateContentBody {
    type_key: String,
    slug: String,
    title: String,
    #[serde(default)]
    body: String,
    status: Option<ContentStatus>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentFilter {
    type_key: Option<String>,
    status: Option<ContentStatus>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl ContentFilter {
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

async fn create_content(
    State(svc): State<AppState>,
    Json(body): Json<CreateContentBody>,
) -> Result<Json<ContentItem>, ApiError> {
    ok_json(svc.create_content(body.type_key, body.slug, body.title, body.body, body.status))
}

async fn get_content(
    State(svc): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ContentItem>, ApiError> {
    ok_json(svc.get_content(id))
}

async fn list_contents(
    State(svc): State<AppState>,
    Query(filter): Query<ContentFilter>,
) -> Result<Json<ListResult<ContentItem>>, ApiError> {
    ok_json(svc.list_contents(filter.type_key.as_deref(), filter.status, &filter.params()))
}

async fn update_content(
    State(svc): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<serde_json::Value>,
) -> Result<Json<ContentItem>, ApiError> {
    ok_json(svc.update_content(id, patch))
}

async fn publish_content(
    State(svc): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ContentItem>, ApiError> {
    ok_json(svc.publish_content(id))
}

async fn unpublish_content(
    State(svc): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ContentItem>, ApiError> {
    ok_json(svc.unpublish_content(id))
}

async fn delete_content(
    State(svc): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    svc.delete_content(id).map_err(ApiError::from)?;
    Ok(Json(serde_json::json!({"ok": true})))
}
