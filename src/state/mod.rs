//! State management module
//!
//! This module contains the timer state machine, its status formatting and
//! the shared application state handed to HTTP handlers and tasks.

pub mod app_state;
pub mod mode;
pub mod status;
pub mod timer;

// Re-export main types
pub use app_state::AppState;
pub use mode::{Mode, StateKind};
pub use status::{format_timer, StatusSnapshot};
pub use timer::{RunState, Timer};
