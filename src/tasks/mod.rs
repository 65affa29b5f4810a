//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod display_sync;
pub mod status_refresh;

// Re-export main functions
pub use display_sync::display_sync_task;
pub use status_refresh::status_refresh_task;
