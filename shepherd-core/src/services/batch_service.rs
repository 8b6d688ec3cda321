//! Batch orchestration of the periodic jobs.

use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};

use super::dns_record_service::DnsRecordService;
use super::health_check_service::{HealthCheckOutcome, HealthCheckService};
use super::notification_service::NotificationService;
use super::release_service::ReleaseService;
use super::ServiceContext;
use crate::error::{CoreError, CoreResult};
use crate::types::{BatchSummary, DomainRecord, EngineConfig, JobKind, NotificationConfig};

/// Drives the health, DNS and release jobs across the whole domain set.
///
/// Every domain is processed inside its own failure boundary. Invocations do not
/// lock each other out; each run works on the domain set it reads at start.
pub struct BatchOrchestrator {
    ctx: Arc<ServiceContext>,
    config: EngineConfig,
    health: HealthCheckService,
    dns: DnsRecordService,
    release: ReleaseService,
    notifications: NotificationService,
}

impl BatchOrchestrator {
    #[must_use]
    pub fn new(
        ctx: Arc<ServiceContext>,
        config: EngineConfig,
        notification_config: NotificationConfig,
    ) -> Self {
        Self {
            health: HealthCheckService::new(ctx.clone(), config.clone()),
            dns: DnsRecordService::new(ctx.clone(), config.clone()),
            release: ReleaseService::new(ctx.clone()),
            notifications: NotificationService::new(ctx.notifier.clone(), notification_config),
            ctx,
            config,
        }
    }

    /// Run a job and send exactly one completion or failure notification.
    pub async fn run_job(&self, job: JobKind) -> CoreResult<BatchSummary> {
        log::info!("Starting job: {job}");
        let result = match job {
            JobKind::CheckDomains => self.check_all_domains().await,
            JobKind::UpdateDns => self.update_all_dns().await,
            JobKind::ReleaseDomains => self.release_expired_domains(false).await,
        };

        match &result {
            Ok(summary) => {
                log::info!(
                    "Job {job} finished: {} processed, {} failed in {:?}",
                    summary.processed,
                    summary.failed_count,
                    summary.elapsed
                );
                self.notifications.notify_job_completed(job, summary).await;
            }
            Err(e) => {
                log::error!("Job {job} failed: {e}");
                self.notifications.notify_job_failed(job, e).await;
            }
        }

        result
    }

    /// Evaluate and persist the health of every tracked domain.
    ///
    /// # Errors
    /// Only when the domain list cannot be read. Per-domain failures land in the summary.
    pub async fn check_all_domains(&self) -> CoreResult<BatchSummary> {
        let started = Instant::now();
        let domains = self.ctx.domain_repository.find_all().await?;
        log::info!("[health] Checking {} domains", domains.len());

        let results: Vec<(String, CoreResult<HealthCheckOutcome>)> = stream::iter(domains)
            .map(|domain| async move {
                self.pause_before_lookups().await;
                let result = self.health.check_domain(&domain).await;
                (domain.name, result)
            })
            .buffer_unordered(self.config.effective_concurrency())
            .collect()
            .await;

        let mut summary = BatchSummary::default();
        for (name, result) in results {
            match result {
                Ok(outcome) => {
                    summary.record_success();
                    if outcome.newly_burned {
                        summary.newly_burned.push(name);
                    }
                    if outcome.should_notify {
                        self.notifications.notify_burned(&outcome.report).await;
                    }
                }
                Err(e) => {
                    log_domain_failure("[health]", &name, &e);
                    summary.record_failure(name, e.to_string());
                }
            }
        }

        summary.elapsed = started.elapsed();
        Ok(summary)
    }

    /// Refresh the DNS blob of every tracked domain.
    ///
    /// # Errors
    /// Only when the domain list cannot be read.
    pub async fn update_all_dns(&self) -> CoreResult<BatchSummary> {
        let started = Instant::now();
        let domains = self.ctx.domain_repository.find_all().await?;
        log::info!("[dns] Updating DNS records for {} domains", domains.len());

        let results: Vec<(String, CoreResult<String>)> = stream::iter(domains)
            .map(|DomainRecord { name, .. }| async move {
                self.pause_before_lookups().await;
                let result = self.dns.refresh_domain(&name).await;
                (name, result)
            })
            .buffer_unordered(self.config.effective_concurrency())
            .collect()
            .await;

        let mut summary = BatchSummary::default();
        for (name, result) in results {
            match result {
                Ok(_) => summary.record_success(),
                Err(e) => {
                    log_domain_failure("[dns]", &name, &e);
                    summary.record_failure(name, e.to_string());
                }
            }
        }

        summary.elapsed = started.elapsed();
        Ok(summary)
    }

    /// Release every domain whose bookings have all ended.
    pub async fn release_expired_domains(&self, dry_run: bool) -> CoreResult<BatchSummary> {
        let started = Instant::now();
        let report = self.release.release_expired(dry_run).await?;

        let mut summary = BatchSummary {
            processed: report.eligible.len(),
            success_count: if dry_run {
                report.eligible.len()
            } else {
                report.released.len()
            },
            failed_count: report.failures.len(),
            failures: report.failures,
            released: report.released,
            ..Default::default()
        };
        summary.elapsed = started.elapsed();
        Ok(summary)
    }

    async fn pause_before_lookups(&self) {
        if let Some(delay) = self.config.request_delay() {
            tokio::time::sleep(delay).await;
        }
    }
}

fn log_domain_failure(component: &str, name: &str, error: &CoreError) {
    if error.is_expected() {
        log::warn!("{component} Error updating {name}: {error}");
    } else {
        log::error!("{component} Error updating {name}: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        booking, create_test_context, date, FailingCategorySource, StaticCategorySource,
        TestContext,
    };
    use crate::types::{DnsRecordType, DomainStatus, HealthStatus, ProviderId};

    fn enabled() -> NotificationConfig {
        NotificationConfig {
            enabled: true,
            ..Default::default()
        }
    }

    fn orchestrator(t: &TestContext) -> BatchOrchestrator {
        BatchOrchestrator::new(t.ctx.clone(), EngineConfig::default(), enabled())
    }

    async fn seed(t: &TestContext, names: &[&str]) {
        for name in names {
            t.domains
                .seed(DomainRecord::new(*name, date(2020, 1, 1), date(2030, 1, 1)))
                .await;
        }
    }

    #[tokio::test]
    async fn one_failing_domain_does_not_stop_the_batch() {
        let t = create_test_context();
        seed(&t, &["x.com", "y.com", "z.com"]).await;
        t.register_category(
            StaticCategorySource::new(ProviderId::Talos)
                .with("y.com", "Business", false)
                .with("z.com", "Malware", true),
        )
        .await;
        t.domains.fail_writes_for("x.com").await;

        let summary = orchestrator(&t).check_all_domains().await.unwrap();

        assert_eq!(summary.processed, 3);
        assert_eq!(summary.failed_count, 1);
        assert_eq!(summary.failures[0].domain_name, "x.com");
        let y = t.domains.get("y.com").await.unwrap();
        assert_eq!(y.categories.talos.as_deref(), Some("Business"));
        let z = t.domains.get("z.com").await.unwrap();
        assert_eq!(z.health_status, HealthStatus::Burned);
        assert_eq!(summary.newly_burned, vec!["z.com".to_string()]);
    }

    #[tokio::test]
    async fn source_failure_degrades_to_no_data() {
        let t = create_test_context();
        seed(&t, &["x.com", "y.com"]).await;
        t.register_category(FailingCategorySource::new(ProviderId::Talos))
            .await;
        t.register_category(
            StaticCategorySource::new(ProviderId::OpenDns)
                .with("x.com", "Parked", false)
                .with("y.com", "Technology", false),
        )
        .await;

        let summary = orchestrator(&t).check_all_domains().await.unwrap();

        assert_eq!(summary.failed_count, 0);
        for name in ["x.com", "y.com"] {
            let stored = t.domains.get(name).await.unwrap();
            assert_eq!(stored.categories.talos, None);
            assert!(stored.categories.opendns.is_some());
        }
    }

    #[tokio::test]
    async fn lookup_error_for_one_domain_leaves_the_others_untouched() {
        let t = create_test_context();
        seed(&t, &["x.com", "y.com", "z.com"]).await;
        t.register_category(
            StaticCategorySource::new(ProviderId::Talos)
                .failing_for("x.com")
                .with("y.com", "Business", false)
                .with("z.com", "Technology", false),
        )
        .await;
        t.register_category(
            StaticCategorySource::new(ProviderId::Bluecoat).with("x.com", "Parked", false),
        )
        .await;

        let summary = orchestrator(&t).check_all_domains().await.unwrap();

        assert_eq!(summary.processed, 3);
        assert_eq!(summary.success_count, 3);
        assert_eq!(summary.failed_count, 0);
        let x = t.domains.get("x.com").await.unwrap();
        assert_eq!(x.categories.talos, None);
        assert_eq!(x.categories.bluecoat.as_deref(), Some("Parked"));
        let y = t.domains.get("y.com").await.unwrap();
        assert_eq!(y.categories.talos.as_deref(), Some("Business"));
        let z = t.domains.get("z.com").await.unwrap();
        assert_eq!(z.categories.talos.as_deref(), Some("Technology"));
        assert_eq!(z.health_status, HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn burned_domain_is_announced_once_across_cycles() {
        let t = create_test_context();
        seed(&t, &["bad.com"]).await;
        t.register_category(StaticCategorySource::new(ProviderId::Talos).with("bad.com", "Phishing", true))
            .await;
        let orchestrator = orchestrator(&t);

        orchestrator.check_all_domains().await.unwrap();
        orchestrator.check_all_domains().await.unwrap();

        let burned: Vec<_> = t
            .notifier
            .messages()
            .await
            .into_iter()
            .filter(|m| m.contains("has been flagged as burned"))
            .collect();
        assert_eq!(burned.len(), 1);
        assert!(burned[0].starts_with("*bad.com*"));
        assert!(burned[0].ends_with("(Bad categories: Phishing)"));
    }

    #[tokio::test]
    async fn run_job_sends_exactly_one_completion_message() {
        let t = create_test_context();
        seed(&t, &["a.com", "b.com"]).await;
        t.resolver.set("a.com", DnsRecordType::A, &["1.2.3.4"]).await;

        let summary = orchestrator(&t).run_job(JobKind::UpdateDns).await.unwrap();

        assert_eq!(summary.success_count, 2);
        let messages = t.notifier.messages().await;
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Task update all DNS records has completed its run."));
        assert_eq!(
            t.domains.get("a.com").await.unwrap().dns_record.as_deref(),
            Some("A: 1.2.3.4")
        );
        assert_eq!(
            t.domains.get("b.com").await.unwrap().dns_record.as_deref(),
            Some("None")
        );
    }

    #[tokio::test]
    async fn run_job_reports_failure_when_domain_list_is_unreadable() {
        let t = create_test_context();
        t.domains.fail_reads().await;

        let err = orchestrator(&t)
            .run_job(JobKind::CheckDomains)
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::StorageError(_)));
        let messages = t.notifier.messages().await;
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Task check all domains failed with this result:"));
    }

    #[tokio::test]
    async fn release_job_returns_released_domains() {
        let t = create_test_context();
        let mut domain = DomainRecord::new("old.com", date(2020, 1, 1), date(2030, 1, 1));
        domain.domain_status = DomainStatus::Unavailable;
        t.domains.seed(domain).await;
        t.bookings.seed(booking("old.com", date(2021, 1, 1))).await;

        let summary = orchestrator(&t)
            .run_job(JobKind::ReleaseDomains)
            .await
            .unwrap();

        assert_eq!(summary.released, vec!["old.com".to_string()]);
        assert_eq!(
            t.domains.get("old.com").await.unwrap().domain_status,
            DomainStatus::Available
        );
        assert_eq!(t.notifier.messages().await.len(), 1);
    }
}
