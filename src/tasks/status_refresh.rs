//! Periodic status refresh task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::state::AppState;

/// Background task that reads the status at a fixed rate so that expired
/// intervals are noticed and published without an incoming request
pub async fn status_refresh_task(state: Arc<AppState>, tick: Duration) {
    info!("Starting status refresh task every {}ms", tick.as_millis());

    let mut interval = interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;

        if let Err(e) = state.get_status(false) {
            warn!("Failed to refresh status: {}", e);
        }
    }
}
