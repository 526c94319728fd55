//! Item HTTP Routes
//!
//! CRUD endpoints for todo items. Mounted by the server under `/items`
//! and under `/api/TodoItems`.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        OriginalUri, Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use super::errors::ApiError;
use crate::items::{ItemService, TodoItem};

/// Item service shared across handlers
pub type ItemState = Arc<dyn ItemService>;

// ==================
// Item Routes
// ==================

/// Create item routes
pub fn item_routes(service: ItemState) -> Router {
    Router::new()
        .route("/", get(list_items_handler).post(create_item_handler))
        .route("/:id", get(get_item_handler).put(update_item_handler))
        .with_state(service)
}

// ==================
// Handlers
// ==================

async fn list_items_handler(
    State(service): State<ItemState>,
) -> Result<Json<Vec<TodoItem>>, ApiError> {
    let items = service.list_items().await?;
    Ok(Json(items))
}

fn parse_id(path: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, ApiError> {
    path.map(|Path(id)| id).map_err(|e| ApiError::InvalidPath(e.body_text()))
}

async fn get_item_handler(
    State(service): State<ItemState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<TodoItem>, ApiError> {
    let id = parse_id(path)?;
    let item = service.get_item(id).await?;
    Ok(Json(item))
}

async fn update_item_handler(
    State(service): State<ItemState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<TodoItem>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(path)?;
    let Json(item) = payload.map_err(|e| ApiError::InvalidBody(e.body_text()))?;

    if item.id != id {
        return Err(ApiError::IdMismatch {
            path: id,
            body: item.id,
        });
    }

    service.update_item(id, &item).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The body is a bare JSON string holding the description. Any id the
/// client might send is never read; a new one is always generated.
async fn create_item_handler(
    State(service): State<ItemState>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<String>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(description) = payload.map_err(|e| ApiError::InvalidBody(e.body_text()))?;

    let item = TodoItem::new(description);
    service.create_item(&item).await?;

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), item.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(item)))
}
