use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use jobmart_core::types::UnifiedTable;
use jobmart_core::JobmartConfig;
use jobmart_view::combine;
use jobmart_warehouse::{TableCache, WarehouseError, WarehouseReader};

/// Central shared state — passed as Arc<AppState> to all Axum handlers.
pub struct AppState {
    pub config: JobmartConfig,
    pub reader: WarehouseReader,
    pub cache: TableCache,
}

impl AppState {
    pub fn new(config: JobmartConfig, reader: WarehouseReader) -> Self {
        let cache = TableCache::new(config.warehouse.cache_ttl_secs);
        Self { config, reader, cache }
    }

    /// The unified table, reloaded through the cache when stale.
    pub fn table(&self) -> Result<Arc<UnifiedTable>, WarehouseError> {
        self.cache
            .get_or_load(|| Ok(combine(self.reader.read_all()?)))
    }
}

/// Assemble the full Axum router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(crate::http::ui::ui_handler))
        .route("/health", get(crate::http::health::health_handler))
        .route("/api/view", get(crate::http::view::view_handler))
        .route("/api/listings", get(crate::http::listings::listings_handler))
        .route("/api/ad/{id}", get(crate::http::listings::ad_handler))
        .route("/api/trends", get(crate::http::trends::trends_handler))
        .route("/api/refresh", post(crate::http::refresh::refresh_handler))
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
