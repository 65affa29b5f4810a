//! Pomodoro timer state machine
//!
//! The timer never ticks on its own. Every operation receives the current
//! instant and reconciles a running interval against its deadline before
//! doing anything else, so expiry is discovered on read.

use std::time::{Duration, Instant};

use super::{format_timer, Mode, StateKind, StatusSnapshot};
use crate::config::TimerConfig;

/// Run state together with the anchor that is valid in that state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Paused { remaining: Duration },
    Running { deadline: Instant },
}

impl RunState {
    pub fn kind(&self) -> StateKind {
        match self {
            RunState::Stopped => StateKind::Stopped,
            RunState::Paused { .. } => StateKind::Paused,
            RunState::Running { .. } => StateKind::Running,
        }
    }
}

/// The single timer owned by the server
#[derive(Debug, Clone)]
pub struct Timer {
    config: TimerConfig,
    mode: Mode,
    state: RunState,
    cycle: u32,
}

impl Timer {
    /// Create a stopped timer at the start of a work interval
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            mode: Mode::Work,
            state: RunState::Stopped,
            cycle: 0,
        }
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    /// Complete a running interval whose deadline has passed.
    ///
    /// Returns true when the interval was completed and the mode advanced.
    pub fn reconcile(&mut self, now: Instant) -> bool {
        match self.state {
            RunState::Running { deadline } if now >= deadline => {
                self.state = RunState::Stopped;
                self.advance_mode();
                true
            }
            _ => false,
        }
    }

    /// Start a stopped interval, resume a paused one, or pause a running one
    pub fn start_or_pause(&mut self, now: Instant) {
        match self.state {
            RunState::Stopped => {
                self.state = RunState::Running {
                    deadline: now + self.config.duration(self.mode),
                };
            }
            RunState::Paused { remaining } => {
                self.state = RunState::Running {
                    deadline: now + remaining,
                };
            }
            RunState::Running { deadline } => {
                if !self.reconcile(now) {
                    self.state = RunState::Paused {
                        remaining: deadline.saturating_duration_since(now),
                    };
                }
            }
        }
    }

    /// Abandon the current interval, or skip to the next mode when stopped.
    ///
    /// A running interval that already expired is completed instead, and the
    /// signal is consumed by that completion. A plain stop would drop the
    /// finished interval without advancing the mode.
    pub fn stop_or_advance(&mut self, now: Instant) {
        if self.reconcile(now) {
            return;
        }

        match self.state {
            RunState::Running { .. } | RunState::Paused { .. } => {
                self.state = RunState::Stopped;
            }
            RunState::Stopped => self.advance_mode(),
        }
    }

    fn advance_mode(&mut self) {
        self.mode = match self.mode {
            Mode::Work => {
                self.cycle += 1;
                if self.cycle < self.config.intervals {
                    Mode::ShortBreak
                } else {
                    Mode::LongBreak
                }
            }
            Mode::ShortBreak => Mode::Work,
            Mode::LongBreak => {
                self.cycle = 0;
                Mode::Work
            }
        };
    }

    /// Time left in the current interval; negative if a deadline has passed
    /// without being reconciled
    pub fn remaining(&self, now: Instant) -> chrono::Duration {
        match self.state {
            RunState::Stopped => to_signed(self.config.duration(self.mode)),
            RunState::Paused { remaining } => to_signed(remaining),
            RunState::Running { deadline } => match deadline.checked_duration_since(now) {
                Some(left) => to_signed(left),
                None => -to_signed(now.duration_since(deadline)),
            },
        }
    }

    /// Render the current status without reconciling
    pub fn snapshot(&self, now: Instant) -> StatusSnapshot {
        StatusSnapshot {
            mode: self.mode,
            state: self.state.kind(),
            timer: format_timer(self.remaining(now), self.config.separator(self.mode)),
            cycle: self.cycle,
            n: self.config.intervals,
        }
    }
}

fn to_signed(duration: Duration) -> chrono::Duration {
    chrono::Duration::from_std(duration).unwrap_or_else(|_| chrono::Duration::MAX)
}
