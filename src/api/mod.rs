//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints.
///
/// Known paths answer 404 rather than 405 to the wrong method.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler).fallback(not_found_handler))
        .route("/status", get(status_handler).fallback(not_found_handler))
        .route("/time", get(time_handler).fallback(not_found_handler))
        .route("/action/start", post(start_handler).fallback(not_found_handler))
        .route("/action/stop", post(stop_handler).fallback(not_found_handler))
        .route("/health", get(health_handler).fallback(not_found_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
