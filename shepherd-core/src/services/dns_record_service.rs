//! DNS record collection for the stored record blob.

use std::sync::Arc;

use futures::future::join_all;

use super::{bounded, ServiceContext};
use crate::error::CoreResult;
use crate::types::{DnsRecordSet, DnsRecordType, EngineConfig};

/// Collects NS/A/MX/TXT/SOA (and DMARC when MX exists) for one domain.
pub struct DnsRecordService {
    ctx: Arc<ServiceContext>,
    config: EngineConfig,
}

impl DnsRecordService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>, config: EngineConfig) -> Self {
        Self { ctx, config }
    }

    /// Query every record type independently. A failed type is left empty.
    pub async fn collect(&self, domain_name: &str) -> DnsRecordSet {
        let queries = DnsRecordType::ALL
            .into_iter()
            .map(|record_type| async move { (record_type, self.query(domain_name, record_type).await) });

        let mut set = DnsRecordSet::default();
        for (record_type, values) in join_all(queries).await {
            set.set_records(record_type, values);
        }

        if !set.mx.is_empty() {
            set.dmarc = self.query_dmarc(domain_name).await;
        }

        set
    }

    /// Collect, serialize and persist the DNS blob. Returns the stored blob.
    pub async fn refresh_domain(&self, domain_name: &str) -> CoreResult<String> {
        let blob = self.collect(domain_name).await.to_blob();
        self.ctx
            .domain_repository
            .update_dns_record(domain_name, &blob)
            .await?;
        log::debug!("[dns] {domain_name}: {blob}");
        Ok(blob)
    }

    async fn query(&self, name: &str, record_type: DnsRecordType) -> Vec<String> {
        match bounded(
            self.config.dns_timeout(),
            self.ctx.dns_resolver.lookup(name, record_type),
        )
        .await
        {
            Ok(values) => values,
            Err(e) => {
                log::warn!("[dns] {record_type} lookup failed for {name}: {e}");
                Vec::new()
            }
        }
    }

    async fn query_dmarc(&self, domain_name: &str) -> Option<String> {
        let records: Vec<String> = self
            .query(&format!("_dmarc.{domain_name}"), DnsRecordType::Txt)
            .await
            .into_iter()
            .filter(|r| r.trim_start().to_ascii_lowercase().starts_with("v=dmarc1"))
            .collect();

        if records.is_empty() {
            None
        } else {
            Some(records.join(", "))
        }
    }
}
