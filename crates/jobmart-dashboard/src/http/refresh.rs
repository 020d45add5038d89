use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::app::AppState;

/// POST /api/refresh — drop the cached table; the next request reloads it
/// from the warehouse.
pub async fn refresh_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    state.cache.invalidate();
    info!("manual cache refresh requested");
    Json(json!({ "refreshed": true }))
}
