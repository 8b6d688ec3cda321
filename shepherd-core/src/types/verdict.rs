//! Health verdicts and per-domain evaluation results.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::HealthUpdate;
use super::observation::AggregatedCategories;
use super::status::HealthStatus;

/// Why a domain was judged burned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "camelCase")]
pub enum BurnReason {
    BadCategories(Vec<String>),
    DnsHealth(String),
    MailBlacklisted(String),
}

impl fmt::Display for BurnReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadCategories(categories) => {
                write!(f, "Bad categories: {}", categories.join(", "))
            }
            Self::DnsHealth(label) => write!(f, "Passive DNS health flagged the domain: {label}"),
            Self::MailBlacklisted(status) => {
                write!(f, "Mail reputation reports blacklisting: {status}")
            }
        }
    }
}

/// Output of the burned-state evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthVerdict {
    pub health: HealthStatus,
    /// Every matching reason, in rule order
    pub reasons: Vec<BurnReason>,
    /// Reasons joined for display; empty when healthy
    pub explanation: String,
}

impl HealthVerdict {
    #[must_use]
    pub fn is_burned(&self) -> bool {
        self.health.is_burned()
    }
}

/// Structured result of one domain's health evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainHealthReport {
    pub domain_name: String,
    pub categories: AggregatedCategories,
    pub health_dns: Option<String>,
    pub mail_status: Option<String>,
    pub verdict: HealthVerdict,
}

impl DomainHealthReport {
    /// Fields to persist for this report.
    #[must_use]
    pub fn to_update(&self) -> HealthUpdate {
        let burned = self.verdict.is_burned();
        HealthUpdate {
            health_status: self.verdict.health.clone(),
            health_dns: self.health_dns.clone(),
            mail_status: self.mail_status.clone(),
            burned_explanation: if self.verdict.explanation.is_empty() {
                None
            } else {
                Some(self.verdict.explanation.clone())
            },
            all_categories: self.categories.all_text(),
            categories: self.categories.slots.clone(),
            mark_burned: burned,
        }
    }
}
