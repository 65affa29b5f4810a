//! Touch bar display synchronisation task

use tokio::sync::watch;
use tracing::{info, warn};

use crate::{services::TouchBarNotifier, state::StatusSnapshot};

/// Background task that forwards every published status to the widget.
///
/// Runs outside the timer lock; failed updates are logged and dropped.
pub async fn display_sync_task(
    mut status_rx: watch::Receiver<StatusSnapshot>,
    mut notifier: TouchBarNotifier,
) {
    info!("Starting display sync task");

    while status_rx.changed().await.is_ok() {
        let snapshot = status_rx.borrow_and_update().clone();

        if let Err(e) = notifier.push(&snapshot).await {
            warn!("Error while sending request: {}", e);
        }
    }

    info!("Status channel closed, display sync task exiting");
}
