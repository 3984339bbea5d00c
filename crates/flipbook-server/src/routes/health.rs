//! Liveness and pipeline status routes.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(root))
}

pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/brochure/status", get(get_status))
}

/// GET /
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Flipbook backend API is running" }))
}

/// GET /api/brochure/status: AI availability and storage stats.
async fn get_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let stats = state.store.get_stats().ok();

    Json(serde_json::json!({
        "aiAvailable": state.pipeline.ai().is_available(),
        "models": state.pipeline.ai().models(),
        "timeoutSecs": state.ai_config.timeout_secs,
        "storeAvailable": stats.is_some(),
        "brochures": stats.as_ref().map(|s| s.total_brochures).unwrap_or(0),
        "dbSizeMb": stats.as_ref().map(|s| s.db_size_mb).unwrap_or(0.0),
        "port": state.config.port,
    }))
}
