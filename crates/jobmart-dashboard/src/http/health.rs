use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::app::AppState;

/// GET /health — liveness probe, returns server and cache metadata.
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "marts": state.reader.marts().len(),
        "cache_stale": state.cache.is_stale(Utc::now()),
        "last_refresh": state.cache.last_refresh().map(|t| t.to_rfc3339()),
    }))
}
