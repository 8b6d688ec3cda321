//! Job and batch result types.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The schedulable jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    CheckDomains,
    UpdateDns,
    ReleaseDomains,
}

impl JobKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::CheckDomains => "check all domains",
            Self::UpdateDns => "update all DNS records",
            Self::ReleaseDomains => "release expired domains",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One domain that failed inside a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFailure {
    pub domain_name: String,
    pub reason: String,
}

/// Summary of one batch cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub processed: usize,
    pub success_count: usize,
    pub failed_count: usize,
    pub failures: Vec<BatchFailure>,
    /// Domains that moved into `Burned` during this cycle
    pub newly_burned: Vec<String>,
    /// Domains released back into the pool (release job only)
    pub released: Vec<String>,
    pub elapsed: Duration,
}

impl BatchSummary {
    pub fn record_success(&mut self) {
        self.processed += 1;
        self.success_count += 1;
    }

    pub fn record_failure(&mut self, domain_name: impl Into<String>, reason: impl Into<String>) {
        self.processed += 1;
        self.failed_count += 1;
        self.failures.push(BatchFailure {
            domain_name: domain_name.into(),
            reason: reason.into(),
        });
    }
}

/// Result of a release pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseReport {
    /// Domains whose bookings have all ended
    pub eligible: Vec<String>,
    /// Domains actually flipped to `Available` (empty in dry-run mode)
    pub released: Vec<String>,
    pub failures: Vec<BatchFailure>,
    pub dry_run: bool,
}

/// Bulk import failure detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportFailure {
    /// 1-based data row number (header excluded)
    pub row: usize,
    pub domain_name: String,
    pub reason: String,
}

/// Bulk import result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub imported: Vec<String>,
    pub failures: Vec<ImportFailure>,
    /// `true` when the import stopped at the first failure
    pub halted: bool,
}
