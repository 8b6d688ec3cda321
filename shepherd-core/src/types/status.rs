//! Status families for tracked domains.
//!
//! Availability and WHOIS privacy are closed enumerations. Health keeps an open
//! extension point for user-defined labels next to the two labels the engine sets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// Availability of a domain in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomainStatus {
    Available,
    Unavailable,
    Reserved,
    Burned,
}

impl DomainStatus {
    pub const ALL: [Self; 4] = [
        Self::Available,
        Self::Unavailable,
        Self::Reserved,
        Self::Burned,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Unavailable => "Unavailable",
            Self::Reserved => "Reserved",
            Self::Burned => "Burned",
        }
    }

    /// Case-insensitive match against the known labels.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DomainStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
            .ok_or_else(|| CoreError::ValidationError(format!("Unknown domain status: {s}")))
    }
}

/// WHOIS privacy status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WhoisStatus {
    Enabled,
    Disabled,
}

impl WhoisStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "Enabled",
            Self::Disabled => "Disabled",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        [Self::Enabled, Self::Disabled]
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for WhoisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WhoisStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
            .ok_or_else(|| CoreError::ValidationError(format!("Unknown WHOIS status: {s}")))
    }
}

/// Health verdict of a domain.
///
/// `Healthy` and `Burned` are the only values the evaluator produces; `Other` holds
/// labels assigned by users (e.g. "Retired") and survives storage round-trips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum HealthStatus {
    #[default]
    Healthy,
    Burned,
    Other(String),
}

impl HealthStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Healthy => "Healthy",
            Self::Burned => "Burned",
            Self::Other(label) => label,
        }
    }

    /// Parse a label; known labels match case-insensitively, anything else becomes `Other`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("healthy") {
            Self::Healthy
        } else if label.eq_ignore_ascii_case("burned") {
            Self::Burned
        } else {
            Self::Other(label.to_string())
        }
    }

    #[must_use]
    pub fn is_burned(&self) -> bool {
        matches!(self, Self::Burned)
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for HealthStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HealthStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}
