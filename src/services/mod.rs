//! External service module
//!
//! This module contains the client that pushes timer updates to a
//! BetterTouchTool touch bar widget.

pub mod touch_bar;

// Re-export main types
pub use touch_bar::{Icon, TouchBarNotifier};
