//! Main application state management

use std::{
    sync::Mutex,
    time::Instant,
};
use tokio::sync::watch;
use tracing::info;

use super::{StatusSnapshot, Timer};
use crate::config::TimerConfig;

/// Shared application state: the timer plus the channel that feeds the display
#[derive(Debug)]
pub struct AppState {
    /// The single timer; every read and write goes through this lock
    timer: Mutex<Timer>,
    /// Server metadata
    pub start_time: Instant,
    pub listen: String,
    /// Latest published status, watched by the display sync task
    status_tx: watch::Sender<StatusSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    _status_rx: watch::Receiver<StatusSnapshot>,
}

impl AppState {
    /// Create a new AppState with a stopped timer
    pub fn new(config: TimerConfig, listen: String) -> Self {
        let timer = Timer::new(config);
        let (status_tx, status_rx) = watch::channel(timer.snapshot(Instant::now()));

        Self {
            timer: Mutex::new(timer),
            start_time: Instant::now(),
            listen,
            status_tx,
            _status_rx: status_rx,
        }
    }

    /// Run `updater` against the timer inside the critical section, then log
    /// and publish the resulting snapshot after the lock is released.
    ///
    /// The updater returns true when it caused an automatic transition, which
    /// is always logged.
    fn update_timer<F>(&self, touch_output: bool, updater: F) -> Result<StatusSnapshot, String>
    where
        F: FnOnce(&mut Timer, Instant) -> bool,
    {
        let mut timer = self.timer.lock()
            .map_err(|e| format!("Failed to lock timer: {}", e))?;

        let now = Instant::now();
        let transitioned = updater(&mut *timer, now);
        let snapshot = timer.snapshot(now);
        drop(timer); // Release the lock before logging and notifying

        if Self::should_log(touch_output, transitioned) {
            info!("{}", snapshot.log_line());
        }

        self.publish(snapshot.clone());
        Ok(snapshot)
    }

    /// Apply the start signal: start, resume or pause
    pub fn start_or_pause(&self) -> Result<StatusSnapshot, String> {
        self.update_timer(true, |timer, now| {
            timer.start_or_pause(now);
            false
        })
    }

    /// Apply the stop signal: abandon the interval or skip to the next mode
    pub fn stop_or_advance(&self) -> Result<StatusSnapshot, String> {
        self.update_timer(true, |timer, now| {
            timer.stop_or_advance(now);
            false
        })
    }

    /// Reconcile the timer and return its status
    pub fn get_status(&self, touch_output: bool) -> Result<StatusSnapshot, String> {
        self.update_timer(touch_output, |timer, now| timer.reconcile(now))
    }

    /// Quiet refresh reads stay out of the log unless the interval ended
    fn should_log(touch_output: bool, transitioned: bool) -> bool {
        touch_output || transitioned
    }

    /// Subscribe to published status changes
    pub fn subscribe(&self) -> watch::Receiver<StatusSnapshot> {
        self.status_tx.subscribe()
    }

    fn publish(&self, snapshot: StatusSnapshot) {
        self.status_tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
