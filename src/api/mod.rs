pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::collector::AggregationEngine;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AggregationEngine>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", axum::routing::get(routes::inventory::get_inventory))
        .route("/api/health", axum::routing::get(routes::health::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
