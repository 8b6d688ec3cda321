//! DNS record-value lookups.
//!
//! Unlike a diagnostic lookup, failures are returned to the caller instead of
//! being folded into an empty answer; only "no such record" yields `Ok(vec![])`.

use std::net::IpAddr;
use std::time::Duration;

use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::{ResolveError, TokioResolver};

use super::resolver::{build_resolver_for_ns, DEFAULT_RESOLVER};
use crate::error::{ToolboxError, ToolboxResult};
use crate::types::DnsQueryType;

/// A resolver bound to one nameserver configuration.
pub struct DnsLookup {
    resolver: TokioResolver,
}

impl DnsLookup {
    /// Resolver using the host system configuration.
    #[must_use]
    pub fn system() -> Self {
        Self {
            resolver: DEFAULT_RESOLVER.clone(),
        }
    }

    /// Resolver that only asks `nameserver`.
    #[must_use]
    pub fn with_nameserver(nameserver: IpAddr) -> Self {
        Self {
            resolver: build_resolver_for_ns(Some(nameserver)),
        }
    }

    /// Query one record type and render each answer as text.
    ///
    /// - NS/CNAME: target name without the trailing dot
    /// - MX: `<preference> <exchange>`
    /// - TXT: character strings concatenated
    /// - SOA: `<mname> <rname> <serial> <refresh> <retry> <expire> <minimum>`
    pub async fn values(
        &self,
        domain: &str,
        record_type: DnsQueryType,
        timeout: Duration,
    ) -> ToolboxResult<Vec<String>> {
        let lookup = tokio::time::timeout(timeout, self.resolver.lookup(domain, to_hickory(record_type)))
            .await
            .map_err(|_| ToolboxError::Timeout(timeout.as_secs()))?;

        let lookup = match lookup {
            Ok(lookup) => lookup,
            Err(e) if is_empty_answer(&e) => return Ok(Vec::new()),
            Err(e) => {
                return Err(ToolboxError::NetworkError(format!(
                    "{record_type} lookup for {domain} failed: {e}"
                )))
            }
        };

        Ok(lookup
            .record_iter()
            .filter(|r| r.record_type() == to_hickory(record_type))
            .filter_map(|r| render(r.data()))
            .collect())
    }
}

fn to_hickory(record_type: DnsQueryType) -> RecordType {
    match record_type {
        DnsQueryType::A => RecordType::A,
        DnsQueryType::Aaaa => RecordType::AAAA,
        DnsQueryType::Cname => RecordType::CNAME,
        DnsQueryType::Mx => RecordType::MX,
        DnsQueryType::Ns => RecordType::NS,
        DnsQueryType::Soa => RecordType::SOA,
        DnsQueryType::Txt => RecordType::TXT,
    }
}

fn is_empty_answer(error: &ResolveError) -> bool {
    error.is_no_records_found() || error.is_nx_domain()
}

fn trim_dot(name: &impl ToString) -> String {
    name.to_string().trim_end_matches('.').to_string()
}

fn render(data: &RData) -> Option<String> {
    match data {
        RData::A(ip) => Some(ip.to_string()),
        RData::AAAA(ip) => Some(ip.to_string()),
        RData::CNAME(name) => Some(trim_dot(&name.0)),
        RData::NS(name) => Some(trim_dot(&name.0)),
        RData::MX(mx) => Some(format!("{} {}", mx.preference(), trim_dot(mx.exchange()))),
        RData::TXT(txt) => Some(
            txt.iter()
                .map(|chunk| String::from_utf8_lossy(chunk).to_string())
                .collect::<String>(),
        ),
        RData::SOA(soa) => Some(format!(
            "{} {} {} {} {} {} {}",
            trim_dot(soa.mname()),
            trim_dot(soa.rname()),
            soa.serial(),
            soa.refresh(),
            soa.retry(),
            soa.expire(),
            soa.minimum()
        )),
        _ => None,
    }
}
