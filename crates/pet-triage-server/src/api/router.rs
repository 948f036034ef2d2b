//! HTTP router.

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

/// Build the service router with request tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ai/diagnose", post(handlers::diagnose))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
