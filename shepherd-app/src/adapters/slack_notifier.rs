//! Slack-style incoming webhook notifier.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use shepherd_core::error::{CoreError, CoreResult};
use shepherd_core::traits::Notifier;
use shepherd_core::types::NotificationConfig;
use shepherd_toolbox::ToolboxService;

use super::toolbox_error;

/// Posts each message to an incoming-webhook URL.
pub struct SlackNotifier {
    webhook_url: String,
    channel: Option<String>,
    username: String,
    icon_emoji: String,
    timeout: Duration,
}

impl SlackNotifier {
    /// Build from the notification settings.
    ///
    /// # Errors
    /// `ValidationError` when no webhook URL is configured.
    pub fn from_config(config: &NotificationConfig) -> CoreResult<Self> {
        let webhook_url = config
            .webhook_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                CoreError::ValidationError("notification.webhook_url is required".to_string())
            })?;

        Ok(Self {
            webhook_url,
            channel: config.channel.clone(),
            username: config.username.clone(),
            icon_emoji: config.icon_emoji.clone(),
            timeout: config.timeout(),
        })
    }

    fn payload(&self, message: &str) -> Value {
        let mut payload = json!({
            "username": self.username,
            "icon_emoji": self.icon_emoji,
            "text": message,
        });
        if let Some(ref channel) = self.channel {
            payload["channel"] = Value::String(channel.clone());
        }
        payload
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn send(&self, message: &str) -> CoreResult<()> {
        ToolboxService::post_json(&self.webhook_url, &self.payload(message), self.timeout)
            .await
            .map_err(|e| toolbox_error("webhook delivery", e))
    }
}
