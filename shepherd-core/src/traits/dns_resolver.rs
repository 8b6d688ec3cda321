//! DNS lookup abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::DnsRecordType;

/// Record-value resolver used by the DNS refresh cycle.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// Query one record type and return its values as display strings.
    ///
    /// An empty vector means the name has no record of that type.
    async fn lookup(&self, name: &str, record_type: DnsRecordType) -> CoreResult<Vec<String>>;
}
