use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::model::{NavRecord, ResolvedNode, SelectOption};
use crate::service::navigation::NewNavItem;

use super::{ok_json, ApiError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/nav/items", post(create_item).get(list_items))
        .route(
            "/nav/items/{id}",
            get(get_item).patch(update_item).delete(delete_item),
        )
        .route("/nav/tree", get(tree))
        .route("/nav/options", get(options))
}

async fn create_item(
    State(svc): State<AppState>,
    Json(body): Json<NewNavItem>,
) -> Result<Json<NavRecord>, ApiError> {
    ok_json(svc.create_nav_item(body))
}

async fn get_item(
    State(svc): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<NavRecord>, ApiError> {
    ok_json(svc.get_nav_item(id))
}

async fn list_items(
    State(svc): State<AppState>,
) -> Result<Json<Vec<NavRecord>>, ApiError> {
    ok_json(svc.list_nav_items())
}

async fn update_item(
    State(svc): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<serde_json::Value>,
) -> Result<Json<NavRecord>, ApiError> {
    ok_json(svc.update_nav_item(id, patch))
}

async fn delete_item(
    State(svc): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    svc.delete_nav_item(id).map_err(ApiError::from)?;
    Ok(Json(serde_json::json!({"ok": true})))
}

#[derive(Deserialize)]
struct TreeQuery {
    /// Drop unresolved entries (and their subtrees) from the response.
    #[serde(default)]
    prune: bool,
}

/// The resolved navigation forest, for the rendering layer.
async fn tree(
    State(svc): State<AppState>,
    Query(query): Query<TreeQuery>,
) -> Result<Json<Vec<ResolvedNode>>, ApiError> {
    ok_json(svc.build_tree(query.prune))
}

/// The indented selection list, for the admin "choose a parent" control.
async fn options(
    State(svc): State<AppState>,
) -> Result<Json<Vec<SelectOption>>, ApiError> {
    ok_json(svc.flatten_for_selection())
}
