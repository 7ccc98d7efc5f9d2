//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Browser UI
        .route("/", get(handlers::index::index))
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Screening API (v1)
        .route("/v1/screen", post(handlers::screen::screen))
        .route("/v1/models", get(handlers::models::list_models))
        // Attach state
        .with_state(state)
}
