//! Notification composition and delivery.

use std::sync::Arc;
use std::time::Duration;

use crate::error::CoreError;
use crate::traits::Notifier;
use crate::types::{BatchSummary, DomainHealthReport, JobKind, NotificationConfig};

/// Builds the outbound messages and pushes them to the sink.
///
/// Delivery failures are logged here and never returned.
pub struct NotificationService {
    notifier: Arc<dyn Notifier>,
    config: NotificationConfig,
}

impl NotificationService {
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>, config: NotificationConfig) -> Self {
        Self { notifier, config }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Announce a domain that was just flagged as burned.
    pub async fn notify_burned(&self, report: &DomainHealthReport) {
        self.send(&burned_message(report)).await;
    }

    /// Announce a finished job.
    pub async fn notify_job_completed(&self, job: JobKind, summary: &BatchSummary) {
        self.send(&job_completed_message(job, summary)).await;
    }

    /// Announce a job that could not run to completion.
    pub async fn notify_job_failed(&self, job: JobKind, error: &CoreError) {
        self.send(&job_failed_message(job, error)).await;
    }

    async fn send(&self, message: &str) {
        if !self.config.enabled {
            log::debug!("[notify] disabled, skipping: {message}");
            return;
        }

        let text = match self.config.alert_target.as_deref() {
            Some(target) if !target.trim().is_empty() => format!("{} {message}", target.trim()),
            _ => message.to_string(),
        };

        if let Err(e) = self.notifier.send(&text).await {
            if e.is_expected() {
                log::warn!("[notify] Delivery failed: {e}");
            } else {
                log::error!("[notify] Delivery failed: {e}");
            }
        }
    }
}

/// `*<domain>* has been flagged as burned because: <explanation>`, plus the bad
/// categories when there are any.
#[must_use]
pub fn burned_message(report: &DomainHealthReport) -> String {
    let mut message = format!(
        "*{}* has been flagged as burned because: {}",
        report.domain_name, report.verdict.explanation
    );
    if report.categories.has_bad() {
        message.push_str(&format!(
            " (Bad categories: {})",
            report.categories.bad.join(", ")
        ));
    }
    message
}

#[must_use]
pub fn job_completed_message(job: JobKind, summary: &BatchSummary) -> String {
    let mut message = format!(
        "Task {} has completed its run. It completed successfully in {}: {} processed, {} failed",
        job.name(),
        format_elapsed(summary.elapsed),
        summary.processed,
        summary.failed_count,
    );
    if !summary.newly_burned.is_empty() {
        message.push_str(&format!(
            ", newly burned: {}",
            summary.newly_burned.join(", ")
        ));
    }
    if !summary.released.is_empty() {
        message.push_str(&format!(", released: {}", summary.released.join(", ")));
    }
    message.push('.');
    message
}

#[must_use]
pub fn job_failed_message(job: JobKind, error: &CoreError) -> String {
    format!("Task {} failed with this result: {error}", job.name())
}

fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.1}s", elapsed.as_secs_f64())
}
