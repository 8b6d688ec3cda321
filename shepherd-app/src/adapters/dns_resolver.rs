//! `DnsResolver` backed by the toolbox hickory lookups.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use shepherd_core::error::CoreResult;
use shepherd_core::traits::DnsResolver;
use shepherd_core::types::DnsRecordType;
use shepherd_toolbox::{DnsLookup, DnsQueryType, ToolboxService};

use super::toolbox_error;

/// Resolves record values through the system resolver or a pinned nameserver.
pub struct HickoryDnsResolver {
    lookup: DnsLookup,
    timeout: Duration,
}

impl HickoryDnsResolver {
    #[must_use]
    pub fn new(nameserver: Option<IpAddr>, timeout: Duration) -> Self {
        let lookup = match nameserver {
            Some(ip) => DnsLookup::with_nameserver(ip),
            None => DnsLookup::system(),
        };
        Self { lookup, timeout }
    }
}

fn query_type(record_type: DnsRecordType) -> DnsQueryType {
    match record_type {
        DnsRecordType::Ns => DnsQueryType::Ns,
        DnsRecordType::A => DnsQueryType::A,
        DnsRecordType::Mx => DnsQueryType::Mx,
        DnsRecordType::Txt => DnsQueryType::Txt,
        DnsRecordType::Soa => DnsQueryType::Soa,
    }
}

#[async_trait]
impl DnsResolver for HickoryDnsResolver {
    async fn lookup(&self, name: &str, record_type: DnsRecordType) -> CoreResult<Vec<String>> {
        ToolboxService::dns_values_with(&self.lookup, name, query_type(record_type), self.timeout)
            .await
            .map_err(|e| toolbox_error(&format!("{record_type} lookup for {name}"), e))
    }
}
