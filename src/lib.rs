//! Tomato - a Pomodoro timer HTTP server for a touch bar widget
//!
//! This library provides the timer state machine, its status formatting,
//! the HTTP API around it and the client that pushes updates to
//! BetterTouchTool.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::{Config, Settings, TimerConfig};
pub use state::{AppState, StatusSnapshot, Timer};
pub use utils::signals::shutdown_signal;
