//! Brochure routes: create (AI pipeline + persist), list, delete.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use tracing::info;

use flipbook_ai::BrochureRequest;
use flipbook_store::NewBrochure;

use super::auth::OwnerId;
use super::response::{success, ApiError};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/brochure", get(list_brochures).post(create_brochure))
        .route("/brochure/{id}", delete(delete_brochure))
}

/// POST /api/brochure: generate brochure content and store it.
async fn create_brochure(
    State(state): State<Arc<AppState>>,
    OwnerId(owner): OwnerId,
    payload: Result<Json<BrochureRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    if req.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title is required".into()));
    }

    let outcome = state
        .pipeline
        .run(&req.title, &req.description, &req.image_urls)
        .await;

    let ai_response =
        serde_json::to_value(&outcome.content).map_err(|e| ApiError::Internal(e.to_string()))?;
    let record = state.store.create_brochure(NewBrochure {
        owner_id: owner,
        title: req.title,
        description: req.description,
        image_urls: outcome.image_urls,
        ai_response: Some(ai_response),
    })?;

    info!(
        "Created brochure {} ({} images)",
        record.id,
        record.image_urls.len()
    );

    Ok(success(serde_json::json!({
        "finalContent": outcome.content,
        "id": record.id,
    })))
}

/// GET /api/brochure: the caller's brochures, newest first.
async fn list_brochures(
    State(state): State<Arc<AppState>>,
    OwnerId(owner): OwnerId,
) -> Result<Json<serde_json::Value>, ApiError> {
    let brochures = state.store.list_for_owner(&owner)?;
    Ok(success(serde_json::json!({ "brochureData": brochures })))
}

/// DELETE /api/brochure/{id}
async fn delete_brochure(
    State(state): State<Arc<AppState>>,
    OwnerId(owner): OwnerId,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if state.store.delete_brochure(&owner, &id)? {
        info!("Deleted brochure {}", id);
        Ok(success(serde_json::json!({})))
    } else {
        Err(ApiError::NotFound(format!("Brochure {} not found", id)))
    }
}
