//! Release of domains whose bookings have all ended.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use super::ServiceContext;
use crate::error::CoreResult;
use crate::types::{BatchFailure, BookingRecord, DomainStatus, ReleaseReport, StatusUpdate};

/// A domain may go back into the pool once every booking on it ended strictly
/// before `today`. A domain with no bookings at all qualifies.
#[must_use]
pub fn is_release_eligible(bookings: &[BookingRecord], today: NaiveDate) -> bool {
    bookings.iter().all(|b| b.end_date < today)
}

/// Reconciles `Unavailable` domains against their booking history.
pub struct ReleaseService {
    ctx: Arc<ServiceContext>,
}

impl ReleaseService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Release against the local calendar date.
    pub async fn release_expired(&self, dry_run: bool) -> CoreResult<ReleaseReport> {
        self.release_domains_as_of(Local::now().date_naive(), dry_run)
            .await
    }

    /// Find eligible domains and, unless `dry_run`, flip each to `Available`.
    ///
    /// Each domain is handled on its own: a booking lookup or status write that
    /// fails is recorded in the report and the pass moves on.
    ///
    /// # Errors
    /// Only when the list of `Unavailable` domains cannot be read.
    pub async fn release_domains_as_of(
        &self,
        today: NaiveDate,
        dry_run: bool,
    ) -> CoreResult<ReleaseReport> {
        let candidates = self
            .ctx
            .domain_repository
            .find_by_status(DomainStatus::Unavailable)
            .await?;

        let mut report = ReleaseReport {
            dry_run,
            ..Default::default()
        };

        for domain in candidates {
            let bookings = match self.ctx.booking_repository.find_by_domain(&domain.name).await {
                Ok(bookings) => bookings,
                Err(e) => {
                    log::error!("[release] Failed to load bookings for {}: {e}", domain.name);
                    report.failures.push(BatchFailure {
                        domain_name: domain.name,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if !is_release_eligible(&bookings, today) {
                continue;
            }
            if bookings.is_empty() {
                log::warn!("[release] {} is unavailable without any booking", domain.name);
            }
            report.eligible.push(domain.name.clone());

            if dry_run {
                continue;
            }

            match self
                .ctx
                .domain_repository
                .update_status(&domain.name, &StatusUpdate::new(DomainStatus::Available))
                .await
            {
                Ok(()) => {
                    log::info!("[release] Releasing {} back into the pool", domain.name);
                    report.released.push(domain.name);
                }
                Err(e) => {
                    log::error!("[release] Failed to release {}: {e}", domain.name);
                    report.failures.push(BatchFailure {
                        domain_name: domain.name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }
}
