//! Type definitions

mod batch;
mod booking;
mod config;
mod dns_record;
mod domain;
mod observation;
mod status;
mod verdict;

pub use batch::{
    BatchFailure, BatchSummary, ImportFailure, ImportResult, JobKind, ReleaseReport,
};
pub use booking::{BookingRecord, CheckoutRequest};
pub use config::{EngineConfig, NotificationConfig};
pub use dns_record::{
    dns_blob_sections, DnsRecordSet, DnsRecordType, DNS_BLOB_DELIMITER, DNS_BLOB_EMPTY,
    MISSING_DMARC_EXPLANATION,
};
pub use domain::{DomainRecord, HealthUpdate, StatusUpdate};
pub use observation::{
    AggregatedCategories, CategorySlots, LookupOutcome, Observation, ProviderId, SignalKind,
};
pub use status::{DomainStatus, HealthStatus, WhoisStatus};
pub use verdict::{BurnReason, DomainHealthReport, HealthVerdict};
