//! Touch bar notifier tests against a local stand-in for BetterTouchTool

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{extract::Query, extract::State, http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;
use url::Url;

use tomato::{
    config::{NotifyConfig, TimerConfig},
    error::NotifyError,
    services::{Icon, TouchBarNotifier},
    state::AppState,
    tasks::display_sync_task,
};

type Received = Arc<Mutex<Vec<HashMap<String, String>>>>;

/// Serve a widget endpoint that records each query and answers with `status`
async fn spawn_widget(status: StatusCode) -> (Url, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route(
            "/update_touch_bar_widget/",
            get(move |State(received): State<Received>, Query(query): Query<HashMap<String, String>>| async move {
                received.lock().unwrap().push(query);
                status
            }),
        )
        .with_state(Arc::clone(&received));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let url = Url::parse(&format!("http://{}/update_touch_bar_widget/", addr)).unwrap();
    (url, received)
}

fn notify_config(url: Url) -> NotifyConfig {
    NotifyConfig {
        url,
        uuid: "widget-uuid".to_string(),
        work_icon: "V09SSw==".to_string(),
        break_icon: "QlJFQUs=".to_string(),
    }
}

#[tokio::test]
async fn test_identical_updates_are_sent_once() {
    let (url, received) = spawn_widget(StatusCode::OK).await;
    let mut notifier = TouchBarNotifier::new(notify_config(url)).unwrap();

    assert!(notifier.send("25:00", Icon::Work).await.unwrap());
    assert!(!notifier.send("25:00", Icon::Work).await.unwrap());

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["uuid"], "widget-uuid");
    assert_eq!(received[0]["text"], "25:00");
    assert_eq!(received[0]["icon_data"], "V09SSw==");
}

#[tokio::test]
async fn test_icon_only_sent_when_it_changes() {
    let (url, received) = spawn_widget(StatusCode::OK).await;
    let mut notifier = TouchBarNotifier::new(notify_config(url)).unwrap();

    notifier.send("25:00", Icon::Work).await.unwrap();
    notifier.send("24:59", Icon::Work).await.unwrap();
    notifier.send("05:00", Icon::Break).await.unwrap();

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 3);
    assert!(!received[1].contains_key("icon_data"));
    assert_eq!(received[1]["text"], "24:59");
    assert_eq!(received[2]["icon_data"], "QlJFQUs=");
}

#[tokio::test]
async fn test_error_status_is_reported_not_retried() {
    let (url, received) = spawn_widget(StatusCode::INTERNAL_SERVER_ERROR).await;
    let mut notifier = TouchBarNotifier::new(notify_config(url)).unwrap();

    let result = notifier.send("25:00", Icon::Work).await;
    assert!(matches!(
        result,
        Err(NotifyError::Status(status)) if status == StatusCode::INTERNAL_SERVER_ERROR
    ));

    // The failed update is still remembered
    assert!(!notifier.send("25:00", Icon::Work).await.unwrap());
    assert_eq!(received.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unreachable_widget_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = Url::parse(&format!("http://{}/update_touch_bar_widget/", addr)).unwrap();
    let mut notifier = TouchBarNotifier::new(notify_config(url)).unwrap();

    assert!(matches!(
        notifier.send("25:00", Icon::Work).await,
        Err(NotifyError::Transport(_))
    ));
}

#[tokio::test]
async fn test_display_sync_forwards_state_changes() {
    let (url, received) = spawn_widget(StatusCode::OK).await;
    let notifier = TouchBarNotifier::new(notify_config(url)).unwrap();

    let state = Arc::new(AppState::new(TimerConfig::default(), "127.0.0.1:0".to_string()));
    tokio::spawn(display_sync_task(state.subscribe(), notifier));

    state.stop_or_advance().unwrap();

    let mut delivered = Vec::new();
    for _ in 0..50 {
        delivered = received.lock().unwrap().clone();
        if !delivered.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0]["text"], "05:00");
    assert_eq!(delivered[0]["icon_data"], "QlJFQUs=");
}
