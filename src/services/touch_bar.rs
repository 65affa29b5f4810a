//! BetterTouchTool widget updates

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::{config::NotifyConfig, error::NotifyError, state::{Mode, StatusSnapshot}};

/// Requests must not hold up the display loop
const REQUEST_TIMEOUT: Duration = Duration::from_millis(200);

/// Which of the two configured icons a widget update carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Work,
    Break,
}

impl Icon {
    pub fn for_mode(mode: Mode) -> Self {
        if mode.is_break() { Icon::Break } else { Icon::Work }
    }
}

/// Pushes timer text and icons to the widget, skipping repeated updates
#[derive(Debug)]
pub struct TouchBarNotifier {
    client: Client,
    config: NotifyConfig,
    last_text: Option<String>,
    last_icon: Option<Icon>,
}

impl TouchBarNotifier {
    pub fn new(config: NotifyConfig) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            config,
            last_text: None,
            last_icon: None,
        })
    }

    /// Forward a status snapshot to the widget
    pub async fn push(&mut self, snapshot: &StatusSnapshot) -> Result<bool, NotifyError> {
        self.send(&snapshot.timer, Icon::for_mode(snapshot.mode)).await
    }

    /// Send `text` with `icon`.
    ///
    /// Returns false without sending when both match the previous update.
    /// Icon data is only attached when the icon changed. The update counts as
    /// sent even if the request fails.
    pub async fn send(&mut self, text: &str, icon: Icon) -> Result<bool, NotifyError> {
        let same_text = self.last_text.as_deref() == Some(text);
        let same_icon = self.last_icon == Some(icon);
        if same_text && same_icon {
            return Ok(false);
        }

        let mut query = vec![("uuid", self.config.uuid.as_str()), ("text", text)];
        if !same_icon {
            query.push(("icon_data", self.icon_data(icon)));
        }

        debug!("Sending widget update text={} icon={:?}", text, icon);
        let result = self.client.get(self.config.url.clone()).query(&query).send().await;

        self.last_text = Some(text.to_string());
        self.last_icon = Some(icon);

        let response = result?;
        if !response.status().is_success() {
            return Err(NotifyError::Status(response.status()));
        }
        Ok(true)
    }

    fn icon_data(&self, icon: Icon) -> &str {
        match icon {
            Icon::Work => &self.config.work_icon,
            Icon::Break => &self.config.break_icon,
        }
    }
}
