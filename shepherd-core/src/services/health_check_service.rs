//! Per-domain health evaluation.

use std::sync::Arc;

use futures::future::join_all;

use super::burned_evaluator::evaluate;
use super::category_aggregator::aggregate;
use super::{bounded, ServiceContext};
use crate::error::CoreResult;
use crate::types::{
    DomainHealthReport, DomainRecord, EngineConfig, LookupOutcome, Observation, SignalKind,
};

/// Result of checking and persisting one domain.
#[derive(Debug, Clone)]
pub struct HealthCheckOutcome {
    pub report: DomainHealthReport,
    /// The domain was not burned before this check
    pub newly_burned: bool,
    /// A burned notification should go out (new burn or changed explanation)
    pub should_notify: bool,
}

/// Queries every registered source for a domain and turns the answers into a verdict.
pub struct HealthCheckService {
    ctx: Arc<ServiceContext>,
    config: EngineConfig,
}

impl HealthCheckService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>, config: EngineConfig) -> Self {
        Self { ctx, config }
    }

    /// Ask every category source about the domain, concurrently.
    ///
    /// Sources that fail, time out or return nothing are left out; the aggregator
    /// treats them as no-data.
    pub async fn collect_observations(&self, domain_name: &str) -> Vec<Observation> {
        let sources = self.ctx.source_registry.category_sources().await;
        let timeout = self.config.lookup_timeout();

        let lookups = sources.iter().map(|source| async move {
            let provider = source.provider();
            match bounded(timeout, source.lookup(domain_name)).await {
                Ok(Some(mut obs)) => {
                    obs.provider = provider;
                    LookupOutcome::Found(obs)
                }
                Ok(None) => {
                    log::debug!("[health] {provider} has no category for {domain_name}");
                    LookupOutcome::NoData
                }
                Err(e) => {
                    log::warn!("[health] {provider} lookup failed for {domain_name}: {e}");
                    LookupOutcome::NoData
                }
            }
        });

        join_all(lookups)
            .await
            .into_iter()
            .filter_map(LookupOutcome::into_option)
            .collect()
    }

    /// Ask the registered source of one signal kind about the domain.
    pub async fn lookup_signal(&self, kind: SignalKind, domain_name: &str) -> LookupOutcome<String> {
        let Some(source) = self.ctx.source_registry.signal_source(kind).await else {
            return LookupOutcome::NoData;
        };

        match bounded(self.config.lookup_timeout(), source.lookup(domain_name)).await {
            Ok(value) => value.filter(|v| !v.trim().is_empty()).into(),
            Err(e) => {
                log::warn!("[health] {kind} lookup failed for {domain_name}: {e}");
                LookupOutcome::NoData
            }
        }
    }

    /// Gather every signal for a domain and evaluate it. Performs no writes.
    pub async fn evaluate_domain(&self, domain_name: &str) -> DomainHealthReport {
        let (observations, health_dns, mail_status) = futures::join!(
            self.collect_observations(domain_name),
            self.lookup_signal(SignalKind::DnsHealth, domain_name),
            self.lookup_signal(SignalKind::MailReputation, domain_name),
        );

        let categories = aggregate(&observations);
        let health_dns = health_dns.into_option();
        let mail_status = mail_status.into_option();
        let verdict = evaluate(&categories, health_dns.as_deref(), mail_status.as_deref());

        DomainHealthReport {
            domain_name: domain_name.to_string(),
            categories,
            health_dns,
            mail_status,
            verdict,
        }
    }

    /// Evaluate a domain and persist the health field group.
    ///
    /// `previous` is the record as read at the start of the cycle; it decides
    /// whether the verdict is a new burn worth announcing.
    pub async fn check_domain(&self, previous: &DomainRecord) -> CoreResult<HealthCheckOutcome> {
        let report = self.evaluate_domain(&previous.name).await;

        self.ctx
            .domain_repository
            .update_health(&previous.name, &report.to_update())
            .await?;

        let burned = report.verdict.is_burned();
        let was_burned = previous.health_status.is_burned();
        let newly_burned = burned && !was_burned;
        let explanation_changed =
            previous.burned_explanation.as_deref() != Some(report.verdict.explanation.as_str());
        let should_notify = newly_burned || (burned && explanation_changed);

        if burned {
            log::info!(
                "[health] {} is burned: {}",
                previous.name,
                report.verdict.explanation
            );
        } else {
            log::debug!("[health] {} is healthy", previous.name);
        }

        Ok(HealthCheckOutcome {
            report,
            newly_burned,
            should_notify,
        })
    }
}
