//! Rutas HTTP del portal
//!
//! `create_app_router` arma la aplicación completa con sus capas, tanto para
//! `main` como para los tests.

pub mod company_routes;

use axum::{extract::DefaultBodyLimit, response::Json, routing::get, Router};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors_layer;
use crate::state::AppState;

pub fn create_app_router(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_layer(&state.config));

    Router::new()
        .route("/health", get(health))
        .nest("/companies", company_routes::create_company_router())
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes()))
        .layer(middleware)
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
