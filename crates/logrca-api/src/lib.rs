//! HTTP surface for log summarization and root cause analysis

pub mod config;
pub mod handlers;
pub mod models;
pub mod state;

use std::sync::Arc;

use axum::{Router, http::Method, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Read-only routes plus the health probe
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/analyze_logs", get(handlers::analyze_logs))
        .route("/chat_rca", get(handlers::chat_rca))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
