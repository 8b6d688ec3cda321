//! Application configuration loaded from a TOML file.
//!
//! ```toml
//! [database]
//! path = "/var/lib/shepherd/shepherd.db"
//!
//! [engine]
//! concurrency = 8
//!
//! [notification]
//! enabled = true
//! webhook_url = "https://hooks.slack.com/services/..."
//! alert_target = "<!here>"
//!
//! [[sources.categories]]
//! provider = "talos"
//! url = "https://reputation.internal/talos"
//!
//! [schedule]
//! check_interval_secs = 86400
//! ```
//!
//! Every section is optional and falls back to its defaults.

use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use shepherd_core::error::{CoreError, CoreResult};
use shepherd_core::types::{EngineConfig, JobKind, NotificationConfig, ProviderId};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub engine: EngineConfig,
    pub notification: NotificationConfig,
    pub sources: SourcesConfig,
    pub schedule: ScheduleConfig,
    pub dns: DnsConfig,
}

impl AppConfig {
    /// Read and parse a configuration file.
    ///
    /// # Errors
    /// `StorageError` when the file cannot be read, `ValidationError` when it is not
    /// valid configuration.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CoreError::StorageError(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Parse configuration text.
    ///
    /// # Errors
    /// `ValidationError` on malformed TOML or unknown provider names.
    pub fn from_toml_str(text: &str) -> CoreResult<Self> {
        toml::from_str(text).map_err(|e| CoreError::ValidationError(format!("Invalid config: {e}")))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("shepherd.db"),
        }
    }
}

/// One category provider endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryEndpoint {
    pub provider: ProviderId,
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub categories: Vec<CategoryEndpoint>,
    /// Passive-DNS health endpoint
    pub dns_health: Option<String>,
    /// Mail reputation endpoint
    pub mail_reputation: Option<String>,
}

/// Job intervals. A missing interval leaves the job unscheduled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub check_interval_secs: Option<u64>,
    pub dns_interval_secs: Option<u64>,
    pub release_interval_secs: Option<u64>,
}

impl ScheduleConfig {
    #[must_use]
    pub fn interval(&self, job: JobKind) -> Option<Duration> {
        let secs = match job {
            JobKind::CheckDomains => self.check_interval_secs,
            JobKind::UpdateDns => self.dns_interval_secs,
            JobKind::ReleaseDomains => self.release_interval_secs,
        };
        secs.filter(|s| *s > 0).map(Duration::from_secs)
    }

    /// Jobs with an interval, paired with it.
    #[must_use]
    pub fn scheduled_jobs(&self) -> Vec<(JobKind, Duration)> {
        [
            JobKind::CheckDomains,
            JobKind::UpdateDns,
            JobKind::ReleaseDomains,
        ]
        .into_iter()
        .filter_map(|job| self.interval(job).map(|every| (job, every)))
        .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DnsConfig {
    /// Ask only this nameserver instead of the system resolver
    pub nameserver: Option<IpAddr>,
}
