//! Engine and notification configuration.
//!
//! Passed into services at construction time; nothing reads settings globally.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const fn default_lookup_timeout_secs() -> u64 {
    15
}

const fn default_dns_timeout_secs() -> u64 {
    10
}

const fn default_concurrency() -> usize {
    4
}

const fn default_notify_timeout_secs() -> u64 {
    10
}

fn default_username() -> String {
    "Shepherd".to_string()
}

fn default_icon_emoji() -> String {
    ":sheep:".to_string()
}

/// Batch engine tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound for a single reputation source lookup
    pub lookup_timeout_secs: u64,
    /// Upper bound for a single DNS query
    pub dns_timeout_secs: u64,
    /// Domains processed at the same time
    pub concurrency: usize,
    /// Pause before each domain's external lookups
    pub request_delay_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lookup_timeout_secs: default_lookup_timeout_secs(),
            dns_timeout_secs: default_dns_timeout_secs(),
            concurrency: default_concurrency(),
            request_delay_ms: 0,
        }
    }
}

impl EngineConfig {
    /// Source lookup timeout, at least one second.
    #[must_use]
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs.max(1))
    }

    /// DNS query timeout, at least one second.
    #[must_use]
    pub fn dns_timeout(&self) -> Duration {
        Duration::from_secs(self.dns_timeout_secs.max(1))
    }

    /// Concurrency clamped to at least one.
    #[must_use]
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }

    #[must_use]
    pub fn request_delay(&self) -> Option<Duration> {
        (self.request_delay_ms > 0).then(|| Duration::from_millis(self.request_delay_ms))
    }
}

/// Outbound chat notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub enabled: bool,
    pub webhook_url: Option<String>,
    pub channel: Option<String>,
    pub username: String,
    pub icon_emoji: String,
    /// Mention prepended to every message, e.g. `<!here>`
    pub alert_target: Option<String>,
    pub timeout_secs: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            webhook_url: None,
            channel: None,
            username: default_username(),
            icon_emoji: default_icon_emoji(),
            alert_target: None,
            timeout_secs: default_notify_timeout_secs(),
        }
    }
}

impl NotificationConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_defaults_fill_missing_fields() {
        let config: EngineConfig = serde_json::from_str(r#"{"concurrency": 0}"#).unwrap();
        assert_eq!(config.lookup_timeout_secs, 15);
        assert_eq!(config.dns_timeout_secs, 10);
        assert_eq!(config.effective_concurrency(), 1);
        assert_eq!(config.request_delay(), None);
    }

    #[test]
    fn zero_timeouts_are_clamped() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"lookup_timeout_secs": 0, "dns_timeout_secs": 0}"#).unwrap();
        assert_eq!(config.lookup_timeout(), Duration::from_secs(1));
        assert_eq!(config.dns_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn notification_defaults_are_disabled() {
        let config = NotificationConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.username, "Shepherd");
        assert_eq!(config.icon_emoji, ":sheep:");
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }
}
