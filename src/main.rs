//! Tomato - a Pomodoro timer HTTP server for a touch bar widget
//!
//! This is the main entry point for the tomato application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use tomato::{
    api::create_router,
    config::Config,
    services::{Icon, TouchBarNotifier},
    state::{format_timer, AppState, Mode},
    tasks::{display_sync_task, status_refresh_task},
    utils::shutdown_signal,
};

fn fatal(message: impl std::fmt::Display) -> ! {
    error!("{}", message);
    eprintln!("{}", message);
    eprintln!("Execute `tomato --help` for usage.");
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("tomato={},tower_http=info", config.log_level()))
        .init();

    info!("Starting tomato server v{}", env!("CARGO_PKG_VERSION"));

    let settings = config.validate().unwrap_or_else(|e| fatal(e));
    info!("Interval={:?} ShortBreak={:?} LongBreak={:?} N={}",
          settings.timer.work, settings.timer.short_break,
          settings.timer.long_break, settings.timer.intervals);

    // Create application state
    let state = Arc::new(AppState::new(settings.timer.clone(), config.address().to_string()));

    if let Some(notify) = settings.notify.clone() {
        let url = notify.url.clone();
        let uuid = notify.uuid.clone();
        let mut notifier = TouchBarNotifier::new(notify).unwrap_or_else(|e| fatal(e));

        // The widget must be reachable before we start serving
        let text = format_timer(
            chrono::Duration::from_std(settings.timer.work).unwrap_or_else(|e| fatal(e)),
            settings.timer.separator(Mode::Work),
        );
        if let Err(e) = notifier.send(&text, Icon::Work).await {
            fatal(format!("Error while sending request to {}: {}", url, e));
        }
        info!("Sending updates with uuid={} every {}ms", uuid, settings.tick.as_millis());

        tokio::spawn(display_sync_task(state.subscribe(), notifier));
    }

    // Start the status refresh background task
    tokio::spawn(status_refresh_task(Arc::clone(&state), settings.tick));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    let listener = TcpListener::bind(config.address()).await?;

    info!("Server listening at http://{}", config.address());
    info!("Endpoints:");
    info!("  GET  /             - Version banner");
    info!("  GET  /status       - Timer text (JSON with Accept: application/json)");
    info!("  GET  /time         - Timer text");
    info!("  POST /action/start - Start or pause the current interval");
    info!("  POST /action/stop  - Stop the interval or switch mode");
    info!("  GET  /health       - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
