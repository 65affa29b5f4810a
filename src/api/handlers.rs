//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use tracing::error;

use crate::state::{AppState, StatusSnapshot};
use super::responses::HealthResponse;

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.contains("application/json"))
        .unwrap_or(false)
}

fn into_timer_text(action: &str, result: Result<StatusSnapshot, String>) -> Result<String, StatusCode> {
    result.map(|snapshot| snapshot.timer).map_err(|e| {
        error!("Failed to {}: {}", action, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handle GET / - Identify the server
pub async fn index_handler() -> String {
    format!("Tomato {}\n", env!("CARGO_PKG_VERSION"))
}

/// Handle GET /status - Timer text, or the full snapshot as JSON
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    let snapshot = match state.get_status(true) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get status: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    if wants_json(&headers) {
        Ok(Json(snapshot).into_response())
    } else {
        Ok(snapshot.timer.into_response())
    }
}

/// Handle GET /time - Timer text only
pub async fn time_handler(State(state): State<Arc<AppState>>) -> Result<String, StatusCode> {
    into_timer_text("get status", state.get_status(true))
}

/// Handle POST /action/start - Start, resume or pause the current interval
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<String, StatusCode> {
    into_timer_text("start timer", state.start_or_pause())
}

/// Handle POST /action/stop - Stop the current interval or switch mode
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<String, StatusCode> {
    into_timer_text("stop timer", state.stop_or_advance())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.get_uptime(), state.listen.clone()))
}

/// Requests with the wrong method on a known path
pub async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}
