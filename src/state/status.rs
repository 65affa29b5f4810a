//! Status formatting
//!
//! Pure rendering of the timer into the compact `MM:SS` text shown on the
//! touch bar and into the structured snapshot returned to API clients.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::{Mode, StateKind};

/// Minutes shown on the display never exceed two digits
const MAX_DISPLAY_MINUTES: i64 = 99;

/// Render `duration` as zero padded `MM<sep>SS`.
///
/// Negative durations render as zero. They appear when a running deadline
/// has just passed but has not been reconciled yet.
pub fn format_timer(duration: Duration, separator: &str) -> String {
    let total = duration.num_seconds().max(0);
    let minutes = (total / 60).min(MAX_DISPLAY_MINUTES);
    let seconds = total % 60;
    format!("{:02}{}{:02}", minutes, separator, seconds)
}

/// Point-in-time view of the timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub mode: Mode,
    pub state: StateKind,
    pub timer: String,
    /// Completed work intervals since the last long break
    pub cycle: u32,
    /// Work intervals before a long break
    pub n: u32,
}

impl StatusSnapshot {
    /// One-line summary for the log, e.g. `[R] 24:59 1/4 work`
    pub fn log_line(&self) -> String {
        format!(
            "{} {} {}/{} {}",
            self.state.tag(),
            self.timer,
            self.cycle,
            self.n,
            self.mode
        )
    }
}
