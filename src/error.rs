//! Error types for startup configuration and display notification

use std::path::PathBuf;
use thiserror::Error;

/// Errors detected while validating command line configuration.
///
/// All of these are fatal: the server refuses to start.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid duration `{0}`")]
    InvalidDuration(String),

    #[error("Invalid number of intervals ({0}), must be between 1 and 9")]
    InvalidIntervals(u32),

    #[error("Invalid tick value ({0}ms), must be between 10 and 1000")]
    InvalidTick(u64),

    #[error("--port and --url can not be used together")]
    ConflictingTarget,

    #[error("Unable to parse url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Must provide all of --icon1, --icon2, --uuid and --port (or --url) to call BetterTouchTool")]
    IncompleteNotification,

    #[error("Unable to load icon {}: {source}", path.display())]
    IconRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from a single outbound display update
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("response status: {0}")]
    Status(reqwest::StatusCode),
}
