//! Menu item REST handlers.
//!
//! Each handler validates its input, calls [`crate::services::MenuItemService`]
//! and serializes the result. Validation and not-found outcomes are client
//! errors and are not logged as faults.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use serde::Serialize;
use tracing::instrument;

use allergen_menu_core::{
    MenuItem, MenuItemId, MenuItemPayload, validate_item_update, validate_new_item,
};

use crate::error::{AppError, NOT_FOUND_MESSAGE, Result};
use crate::state::AppState;

/// Build the menu item router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/menu-items", get(list).post(create))
        .route(
            "/api/menu-items/{id}",
            get(show).put(update).delete(destroy),
        )
}

/// Confirmation body for deletes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// A path segment that is not a valid ID cannot name any menu item.
fn parse_id(raw: &str) -> Result<MenuItemId> {
    raw.parse()
        .map_err(|_| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))
}

fn parse_body(body: std::result::Result<Json<MenuItemPayload>, JsonRejection>) -> Result<MenuItemPayload> {
    body.map(|Json(payload)| payload)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// List all menu items, newest first.
///
/// GET /api/menu-items
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<MenuItem>>> {
    Ok(Json(state.menu_items().list().await?))
}

/// Fetch one menu item.
///
/// GET /api/menu-items/{id}
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<MenuItem>> {
    let id = parse_id(&id)?;
    Ok(Json(state.menu_items().get(id).await?))
}

/// Create a menu item.
///
/// POST /api/menu-items
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<MenuItemPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<MenuItem>)> {
    let payload = parse_body(body)?;
    let item = validate_new_item(&payload).inspect_err(|e| {
        tracing::debug!(error = %e, "Rejected menu item");
    })?;

    let created = state.menu_items().create(item).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Apply a partial update to a menu item.
///
/// PUT /api/menu-items/{id}
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: std::result::Result<Json<MenuItemPayload>, JsonRejection>,
) -> Result<Json<MenuItem>> {
    let id = parse_id(&id)?;
    let payload = parse_body(body)?;
    let update = validate_item_update(&payload).inspect_err(|e| {
        tracing::debug!(item_id = %id, error = %e, "Rejected menu item update");
    })?;

    Ok(Json(state.menu_items().update(id, update).await?))
}

/// Delete a menu item.
///
/// DELETE /api/menu-items/{id}
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    state.menu_items().delete(id).await?;

    Ok(Json(MessageResponse {
        message: "Menu item deleted".to_string(),
    }))
}
