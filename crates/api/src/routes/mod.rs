pub mod health;
pub mod notifications;

use axum::Router;
use axum::extract::DefaultBodyLimit;

use crate::middleware::logging::log_request;
use crate::state::AppState;

/// Version prefix for the public API.
pub const API_VERSION: &str = "/v1";

/// Largest request body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Build the complete API router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(notifications::router())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(axum::middleware::from_fn(log_request))
        .with_state(state)
}
