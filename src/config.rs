//! Configuration and CLI argument handling
//!
//! Flags are parsed once by clap into [`Config`], then validated into the
//! immutable [`Settings`] that the rest of the server is built from.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use clap::Parser;
use url::Url;

use crate::{error::ConfigError, state::Mode};

/// Largest accepted interval, keeps deadline arithmetic far from overflow
const MAX_INTERVAL_SECS: u64 = u32::MAX as u64;

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "tomato")]
#[command(about = "Tomato on TouchBar - a Pomodoro timer server for BetterTouchTool")]
#[command(version)]
#[command(after_help = "Send updates to BetterTouchTool:\n  \
    tomato --icon1=PATH_ICON1 --icon2=PATH_ICON2 --uuid=UUID --port=12345\n  \
    tomato --icon1=PATH_ICON1 --icon2=PATH_ICON2 --uuid=UUID --url=http://127.0.0.1:12345/update_touch_bar_widget/")]
pub struct Config {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:12321")]
    pub listen: String,

    /// Number of work intervals before a long break
    #[arg(short, default_value_t = 4)]
    pub n: u32,

    /// Separator shown during work intervals
    #[arg(long, default_value = ":")]
    pub colon: String,

    /// Alternative separator for break modes
    #[arg(long = "colon-alt", default_value = ":")]
    pub colon_alt: String,

    /// Work interval (e.g. 25m, 300s)
    #[arg(long, default_value = "25m")]
    pub work: String,

    /// Short break interval
    #[arg(long, default_value = "5m")]
    pub short: String,

    /// Long break interval
    #[arg(long, default_value = "15m")]
    pub long: String,

    /// Icon for work session
    #[arg(long)]
    pub icon1: Option<PathBuf>,

    /// Icon for break session
    #[arg(long)]
    pub icon2: Option<PathBuf>,

    /// UUID of the widget
    #[arg(long)]
    pub uuid: Option<String>,

    /// BetterTouchTool port
    #[arg(long)]
    pub port: Option<u16>,

    /// URL to send updates to
    #[arg(long)]
    pub url: Option<String>,

    /// Duration in ms between status refreshes
    #[arg(long, default_value_t = 100)]
    pub tick: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Interval lengths and display settings, fixed for the process lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerConfig {
    pub work: Duration,
    pub short_break: Duration,
    pub long_break: Duration,
    /// Work intervals before a long break, always in `1..=9`
    pub intervals: u32,
    pub separator: String,
    pub break_separator: String,
}

impl TimerConfig {
    /// Configured length of an interval in `mode`
    pub fn duration(&self, mode: Mode) -> Duration {
        match mode {
            Mode::Work => self.work,
            Mode::ShortBreak => self.short_break,
            Mode::LongBreak => self.long_break,
        }
    }

    /// Separator between minutes and seconds while in `mode`
    pub fn separator(&self, mode: Mode) -> &str {
        match mode {
            Mode::Work => &self.separator,
            Mode::ShortBreak | Mode::LongBreak => &self.break_separator,
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work: Duration::from_secs(25 * 60),
            short_break: Duration::from_secs(5 * 60),
            long_break: Duration::from_secs(15 * 60),
            intervals: 4,
            separator: ":".to_string(),
            break_separator: ":".to_string(),
        }
    }
}

/// Everything needed to push updates to a BetterTouchTool widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyConfig {
    pub url: Url,
    pub uuid: String,
    /// Base64 encoded icon shown during work
    pub work_icon: String,
    /// Base64 encoded icon shown during breaks
    pub break_icon: String,
}

/// Validated startup settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub timer: TimerConfig,
    pub notify: Option<NotifyConfig>,
    pub tick: Duration,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the listen address
    pub fn address(&self) -> &str {
        &self.listen
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Validate all flags, loading icons from disk when notification is enabled
    pub fn validate(&self) -> Result<Settings, ConfigError> {
        let timer = self.timer_config()?;

        if self.tick <= 10 || self.tick >= 1000 {
            return Err(ConfigError::InvalidTick(self.tick));
        }

        Ok(Settings {
            timer,
            notify: self.notify_config()?,
            tick: Duration::from_millis(self.tick),
        })
    }

    /// Build the timer configuration from the interval flags
    pub fn timer_config(&self) -> Result<TimerConfig, ConfigError> {
        if !(1..=9).contains(&self.n) {
            return Err(ConfigError::InvalidIntervals(self.n));
        }

        Ok(TimerConfig {
            work: parse_duration(&self.work)?,
            short_break: parse_duration(&self.short)?,
            long_break: parse_duration(&self.long)?,
            intervals: self.n,
            separator: self.colon.clone(),
            break_separator: self.colon_alt.clone(),
        })
    }

    /// Resolve the notification target, if any
    fn target_url(&self) -> Result<Option<Url>, ConfigError> {
        match (&self.url, self.port) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingTarget),
            (Some(raw), None) => Url::parse(raw)
                .map(Some)
                .map_err(|source| ConfigError::InvalidUrl { url: raw.clone(), source }),
            (None, Some(port)) => {
                let raw = format!("http://127.0.0.1:{}/update_touch_bar_widget/", port);
                Url::parse(&raw)
                    .map(Some)
                    .map_err(|source| ConfigError::InvalidUrl { url: raw, source })
            }
            (None, None) => Ok(None),
        }
    }

    /// Build the notification configuration; the four settings go together
    pub fn notify_config(&self) -> Result<Option<NotifyConfig>, ConfigError> {
        let url = self.target_url()?;

        match (url, &self.uuid, &self.icon1, &self.icon2) {
            (None, None, None, None) => Ok(None),
            (Some(url), Some(uuid), Some(icon1), Some(icon2)) => Ok(Some(NotifyConfig {
                url,
                uuid: uuid.clone(),
                work_icon: load_icon(icon1)?,
                break_icon: load_icon(icon2)?,
            })),
            _ => Err(ConfigError::IncompleteNotification),
        }
    }
}

/// Parse an interval like `25m`, `300s` or `25` (minutes by default)
pub fn parse_duration(input: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidDuration(input.to_string());

    let (digits, unit_secs) = if let Some(rest) = input.strip_suffix('s') {
        (rest, 1)
    } else if let Some(rest) = input.strip_suffix('m') {
        (rest, 60)
    } else {
        (input, 60)
    };

    let value: u64 = digits.parse().map_err(|_| invalid())?;
    if value == 0 {
        return Err(invalid());
    }

    let secs = value
        .checked_mul(unit_secs)
        .filter(|secs| *secs <= MAX_INTERVAL_SECS)
        .ok_or_else(invalid)?;

    Ok(Duration::from_secs(secs))
}

/// Read an icon file and encode it for the widget API
pub fn load_icon(path: &Path) -> Result<String, ConfigError> {
    let data = fs::read(path).map_err(|source| ConfigError::IconRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(base64::encode(data))
}
