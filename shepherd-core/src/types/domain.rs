//! Tracked domain record and its field-group updates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::observation::CategorySlots;
use super::status::{DomainStatus, HealthStatus, WhoisStatus};

/// One tracked domain name (unique key: `name`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRecord {
    pub name: String,
    pub registrar: Option<String>,
    pub creation: NaiveDate,
    pub expiration: NaiveDate,
    /// Serialized DNS record blob (see `DnsRecordSet::to_blob`)
    pub dns_record: Option<String>,
    pub categories: CategorySlots,
    /// Aggregated "all categories" text
    pub all_categories: Option<String>,
    pub health_status: HealthStatus,
    /// Passive-DNS derived health label
    pub health_dns: Option<String>,
    /// Mail reputation status
    pub mail_status: Option<String>,
    pub burned_explanation: Option<String>,
    pub domain_status: DomainStatus,
    pub whois_status: WhoisStatus,
    pub last_used_by: Option<String>,
    pub note: Option<String>,
}

impl DomainRecord {
    /// Create a record with the defaults used for newly added domains.
    #[must_use]
    pub fn new(name: impl Into<String>, creation: NaiveDate, expiration: NaiveDate) -> Self {
        Self {
            name: name.into(),
            registrar: None,
            creation,
            expiration,
            dns_record: None,
            categories: CategorySlots::default(),
            all_categories: None,
            health_status: HealthStatus::Healthy,
            health_dns: None,
            mail_status: None,
            burned_explanation: None,
            domain_status: DomainStatus::Available,
            whois_status: WhoisStatus::Enabled,
            last_used_by: None,
            note: None,
        }
    }

    /// Days since the domain was purchased.
    #[must_use]
    pub fn age_days(&self, today: NaiveDate) -> i64 {
        (today - self.creation).num_days()
    }

    /// Split the stored DNS blob into its display sections.
    #[must_use]
    pub fn dns_sections(&self) -> Vec<String> {
        self.dns_record
            .as_deref()
            .map(super::dns_record::dns_blob_sections)
            .unwrap_or_default()
    }

    /// Apply a health-cycle update in memory (mirrors what repositories persist).
    pub fn apply_health(&mut self, update: &HealthUpdate) {
        self.health_status = update.health_status.clone();
        self.health_dns.clone_from(&update.health_dns);
        self.mail_status.clone_from(&update.mail_status);
        self.burned_explanation.clone_from(&update.burned_explanation);
        self.all_categories.clone_from(&update.all_categories);
        self.categories = update.categories.clone();
        if update.mark_burned {
            self.domain_status = DomainStatus::Burned;
        }
    }

    /// Apply an availability update in memory.
    pub fn apply_status(&mut self, update: &StatusUpdate) {
        self.domain_status = update.domain_status;
        if let Some(ref user) = update.last_used_by {
            self.last_used_by = Some(user.clone());
        }
    }
}

/// Fields owned by the health-check cycle.
///
/// Written as one group so the DNS cycle and user actions never clobber them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthUpdate {
    pub health_status: HealthStatus,
    pub health_dns: Option<String>,
    pub mail_status: Option<String>,
    pub burned_explanation: Option<String>,
    pub all_categories: Option<String>,
    pub categories: CategorySlots,
    /// Also flip availability to `Burned`
    pub mark_burned: bool,
}

/// Availability transition, optionally recording the user who caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub domain_status: DomainStatus,
    /// `None` leaves the stored user untouched
    pub last_used_by: Option<String>,
}

impl StatusUpdate {
    #[must_use]
    pub fn new(domain_status: DomainStatus) -> Self {
        Self {
            domain_status,
            last_used_by: None,
        }
    }

    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.last_used_by = Some(user.into());
        self
    }
}
