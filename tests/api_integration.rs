//! HTTP API tests driven through the router without binding a socket

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use tomato::{api::create_router, config::TimerConfig, state::AppState, StatusSnapshot};

fn create_test_app() -> (Router, Arc<AppState>) {
    let config = TimerConfig {
        break_separator: "ː".to_string(),
        ..TimerConfig::default()
    };
    let state = Arc::new(AppState::new(config, "127.0.0.1:0".to_string()));
    (create_router(Arc::clone(&state)), state)
}

async fn call(app: &Router, method: Method, uri: &str, accept: Option<&str>) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(accept) = accept {
        builder = builder.header(header::ACCEPT, accept);
    }
    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_index_banner() {
    let (app, _) = create_test_app();
    let (status, body) = call(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, format!("Tomato {}\n", env!("CARGO_PKG_VERSION")));
}

#[tokio::test]
async fn test_status_text_and_json() {
    let (app, _) = create_test_app();

    let (status, body) = call(&app, Method::GET, "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "25:00");

    let (status, body) = call(&app, Method::GET, "/status", Some("application/json")).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "mode": "work",
            "state": "stopped",
            "timer": "25:00",
            "cycle": 0,
            "n": 4,
        })
    );
}

#[tokio::test]
async fn test_time_endpoint() {
    let (app, _) = create_test_app();
    let (status, body) = call(&app, Method::GET, "/time", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "25:00");
}

#[tokio::test]
async fn test_start_pause_cycle() {
    let (app, _) = create_test_app();

    let (status, _) = call(&app, Method::POST, "/action/start", None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = call(&app, Method::GET, "/status", Some("application/json")).await;
    let snapshot: StatusSnapshot = serde_json::from_str(&body).unwrap();
    assert_eq!(snapshot.state, tomato::state::StateKind::Running);

    call(&app, Method::POST, "/action/start", None).await;
    let (_, body) = call(&app, Method::GET, "/status", Some("application/json")).await;
    let snapshot: StatusSnapshot = serde_json::from_str(&body).unwrap();
    assert_eq!(snapshot.state, tomato::state::StateKind::Paused);
}

#[tokio::test]
async fn test_stop_skips_to_break() {
    let (app, state) = create_test_app();

    let (status, body) = call(&app, Method::POST, "/action/stop", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "05ː00");

    let snapshot = state.get_status(false).unwrap();
    assert_eq!(snapshot.mode, tomato::state::Mode::ShortBreak);
    assert_eq!(snapshot.cycle, 1);
}

#[tokio::test]
async fn test_wrong_method_is_not_found() {
    let (app, state) = create_test_app();

    for (method, uri) in [
        (Method::POST, "/"),
        (Method::POST, "/status"),
        (Method::DELETE, "/time"),
        (Method::GET, "/action/start"),
        (Method::GET, "/action/stop"),
    ] {
        let (status, _) = call(&app, method.clone(), uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
    }

    // Rejected requests never touch the timer
    assert_eq!(state.get_status(false).unwrap().mode, tomato::state::Mode::Work);
}

#[tokio::test]
async fn test_unknown_path() {
    let (app, _) = create_test_app();
    let (status, _) = call(&app, Method::GET, "/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let (app, _) = create_test_app();
    let (status, body) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["listen"], "127.0.0.1:0");
}
