//! Interval modes and run states

use std::fmt;

use serde::{Deserialize, Serialize};

/// The phase the timer is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    Work,
    ShortBreak,
    LongBreak,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Work => "work",
            Mode::ShortBreak => "short-break",
            Mode::LongBreak => "long-break",
        }
    }

    pub fn is_break(&self) -> bool {
        !matches!(self, Mode::Work)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run state tag, without the timing anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateKind {
    Stopped,
    Paused,
    Running,
}

impl StateKind {
    /// Short tag used in log lines
    pub fn tag(&self) -> &'static str {
        match self {
            StateKind::Stopped => "[S]",
            StateKind::Paused => "[P]",
            StateKind::Running => "[R]",
        }
    }
}
