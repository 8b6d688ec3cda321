//! Reputation observations and their aggregated form.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Known category providers. Each one owns a category slot on the domain record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Talos,
    OpenDns,
    Bluecoat,
    XForce,
    TrendMicro,
    Fortiguard,
}

impl ProviderId {
    /// Fixed provider order; aggregation walks providers in this order.
    pub const ALL: [Self; 6] = [
        Self::Talos,
        Self::OpenDns,
        Self::Bluecoat,
        Self::XForce,
        Self::TrendMicro,
        Self::Fortiguard,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Talos => "talos",
            Self::OpenDns => "opendns",
            Self::Bluecoat => "bluecoat",
            Self::XForce => "xforce",
            Self::TrendMicro => "trendmicro",
            Self::Fortiguard => "fortiguard",
        }
    }

    /// Human readable provider name
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Talos => "Cisco Talos",
            Self::OpenDns => "OpenDNS",
            Self::Bluecoat => "Bluecoat",
            Self::XForce => "IBM X-Force",
            Self::TrendMicro => "TrendMicro",
            Self::Fortiguard => "Fortiguard",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::ValidationError(format!("Unknown category provider: {s}")))
    }
}

/// Single-valued health signals consumed by the evaluator next to the categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// Passive-DNS derived health label
    DnsHealth,
    /// Mail/spam reputation status
    MailReputation,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DnsHealth => f.write_str("dns_health"),
            Self::MailReputation => f.write_str("mail_reputation"),
        }
    }
}

/// One provider's finding for one domain in one evaluation cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub domain_name: String,
    pub provider: ProviderId,
    pub category: String,
    pub is_bad: bool,
}

impl Observation {
    #[must_use]
    pub fn new(
        domain_name: impl Into<String>,
        provider: ProviderId,
        category: impl Into<String>,
        is_bad: bool,
    ) -> Self {
        Self {
            domain_name: domain_name.into(),
            provider,
            category: category.into().trim().to_string(),
            is_bad,
        }
    }
}

/// Result of asking one external source about one domain.
///
/// `NoData` means the source was asked but produced nothing usable (error, timeout,
/// empty answer). It is never the same thing as a confirmed clean result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome<T> {
    Found(T),
    NoData,
}

impl<T> LookupOutcome<T> {
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NoData => None,
        }
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

impl<T> From<Option<T>> for LookupOutcome<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::NoData, Self::Found)
    }
}

/// Per-provider category slots as stored on a domain record.
///
/// `None` means no data was obtained from that provider; it is stored as NULL and
/// never defaulted to a clean label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySlots {
    pub talos: Option<String>,
    pub opendns: Option<String>,
    pub bluecoat: Option<String>,
    pub xforce: Option<String>,
    pub trendmicro: Option<String>,
    pub fortiguard: Option<String>,
}

impl CategorySlots {
    #[must_use]
    pub fn get(&self, provider: ProviderId) -> Option<&str> {
        match provider {
            ProviderId::Talos => self.talos.as_deref(),
            ProviderId::OpenDns => self.opendns.as_deref(),
            ProviderId::Bluecoat => self.bluecoat.as_deref(),
            ProviderId::XForce => self.xforce.as_deref(),
            ProviderId::TrendMicro => self.trendmicro.as_deref(),
            ProviderId::Fortiguard => self.fortiguard.as_deref(),
        }
    }

    pub fn set(&mut self, provider: ProviderId, value: Option<String>) {
        let slot = match provider {
            ProviderId::Talos => &mut self.talos,
            ProviderId::OpenDns => &mut self.opendns,
            ProviderId::Bluecoat => &mut self.bluecoat,
            ProviderId::XForce => &mut self.xforce,
            ProviderId::TrendMicro => &mut self.trendmicro,
            ProviderId::Fortiguard => &mut self.fortiguard,
        };
        *slot = value;
    }

    /// Providers that produced no data.
    #[must_use]
    pub fn missing(&self) -> Vec<ProviderId> {
        ProviderId::ALL
            .into_iter()
            .filter(|p| self.get(*p).is_none())
            .collect()
    }
}

/// Categories merged across every provider for one domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedCategories {
    /// Every label seen, deduplicated, in first-seen order
    pub all: Vec<String>,
    /// Labels reported by providers that flagged the domain as bad
    pub bad: Vec<String>,
    pub slots: CategorySlots,
}

impl AggregatedCategories {
    /// Display form of `all`; `None` when no provider returned a label.
    #[must_use]
    pub fn all_text(&self) -> Option<String> {
        if self.all.is_empty() {
            None
        } else {
            Some(self.all.join(", "))
        }
    }

    #[must_use]
    pub fn has_bad(&self) -> bool {
        !self.bad.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_id_parses_config_names() {
        assert_eq!("OpenDNS".parse::<ProviderId>().unwrap(), ProviderId::OpenDns);
        assert_eq!("xforce".parse::<ProviderId>().unwrap(), ProviderId::XForce);
        assert!("virustotal".parse::<ProviderId>().is_err());
    }

    #[test]
    fn provider_id_serde_matches_as_str() {
        for provider in ProviderId::ALL {
            let json = serde_json::to_string(&provider).unwrap();
            assert_eq!(json, format!("\"{}\"", provider.as_str()));
        }
    }

    #[test]
    fn observation_trims_category() {
        let obs = Observation::new("a.com", ProviderId::Talos, "  Business ", false);
        assert_eq!(obs.category, "Business");
    }

    #[test]
    fn slots_set_and_get() {
        let mut slots = CategorySlots::default();
        slots.set(ProviderId::Fortiguard, Some("Malicious Websites".to_string()));
        assert_eq!(slots.get(ProviderId::Fortiguard), Some("Malicious Websites"));
        assert_eq!(slots.get(ProviderId::Talos), None);
        assert_eq!(slots.missing().len(), 5);
    }

    #[test]
    fn lookup_outcome_from_option() {
        assert_eq!(LookupOutcome::from(Some(1)), LookupOutcome::Found(1));
        assert_eq!(LookupOutcome::<i32>::from(None), LookupOutcome::NoData);
        assert!(!LookupOutcome::<i32>::NoData.is_found());
    }

    #[test]
    fn all_text_is_none_without_labels() {
        assert_eq!(AggregatedCategories::default().all_text(), None);
    }
}
