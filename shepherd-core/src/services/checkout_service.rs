//! User-driven checkout and release of domains.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use super::ServiceContext;
use crate::error::{CoreError, CoreResult};
use crate::types::{BookingRecord, CheckoutRequest, DomainRecord, DomainStatus, StatusUpdate};

/// Checkout / release service
pub struct CheckoutService {
    ctx: Arc<ServiceContext>,
}

impl CheckoutService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Check a domain out for a project starting today.
    pub async fn checkout(
        &self,
        domain_name: &str,
        request: CheckoutRequest,
    ) -> CoreResult<BookingRecord> {
        self.checkout_as_of(domain_name, request, Local::now().date_naive())
            .await
    }

    /// Check a domain out with an explicit start date.
    ///
    /// Creates the booking first, then marks the domain `Unavailable` for the operator.
    pub async fn checkout_as_of(
        &self,
        domain_name: &str,
        request: CheckoutRequest,
        today: NaiveDate,
    ) -> CoreResult<BookingRecord> {
        let domain = self.get_domain(domain_name).await?;
        if domain.domain_status != DomainStatus::Available {
            return Err(CoreError::InvalidState(format!(
                "{domain_name} is {} and cannot be checked out",
                domain.domain_status
            )));
        }

        let operator = required("operator", &request.operator)?;
        let client = required("client", &request.client)?;
        if request.end_date < today {
            return Err(CoreError::ValidationError(
                "Invalid date: The provided end date is in past".to_string(),
            ));
        }

        let booking = BookingRecord {
            id: uuid::Uuid::new_v4().to_string(),
            start_date: today,
            end_date: request.end_date,
            client,
            domain_name: domain.name.clone(),
            operator: Some(operator.clone()),
            project_type: request.project_type,
            activity_type: request.activity_type,
            note: request.note,
            slack_channel: request.slack_channel,
        };

        self.ctx.booking_repository.insert(&booking).await?;
        self.ctx
            .domain_repository
            .update_status(
                &domain.name,
                &StatusUpdate::new(DomainStatus::Unavailable).with_user(operator),
            )
            .await?;

        log::info!(
            "{} checked out by {} until {}",
            domain.name,
            booking.operator.as_deref().unwrap_or_default(),
            booking.end_date
        );
        Ok(booking)
    }

    /// Return a checked-out domain to the pool.
    ///
    /// Only the user who checked the domain out may release it.
    pub async fn release(&self, domain_name: &str, user: &str) -> CoreResult<()> {
        let domain = self.get_domain(domain_name).await?;
        if domain.last_used_by.as_deref() != Some(user) {
            return Err(CoreError::NotAuthorized(format!(
                "{user} did not check out {domain_name} and cannot release it"
            )));
        }

        self.ctx
            .domain_repository
            .update_status(&domain.name, &StatusUpdate::new(DomainStatus::Available))
            .await?;
        log::info!("{} released by {user}", domain.name);
        Ok(())
    }

    /// Change a booking's end date. An earlier date may expire it immediately.
    pub async fn update_end_date(
        &self,
        booking_id: &str,
        end_date: NaiveDate,
    ) -> CoreResult<BookingRecord> {
        let mut booking = self
            .ctx
            .booking_repository
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| CoreError::BookingNotFound(booking_id.to_string()))?;

        if end_date < booking.start_date {
            return Err(CoreError::ValidationError(format!(
                "End date {end_date} precedes start date {}",
                booking.start_date
            )));
        }

        self.ctx
            .booking_repository
            .update_end_date(booking_id, end_date)
            .await?;
        booking.end_date = end_date;
        Ok(booking)
    }

    /// Bookings that still hold the domain on `today`.
    pub async fn active_bookings(
        &self,
        domain_name: &str,
        today: NaiveDate,
    ) -> CoreResult<Vec<BookingRecord>> {
        let bookings = self
            .ctx
            .booking_repository
            .find_by_domain(domain_name)
            .await?;
        Ok(bookings.into_iter().filter(|b| b.is_active(today)).collect())
    }

    async fn get_domain(&self, name: &str) -> CoreResult<DomainRecord> {
        self.ctx
            .domain_repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| CoreError::DomainNotFound(name.to_string()))
    }
}

fn required(field: &str, value: &str) -> CoreResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CoreError::ValidationError(format!("{field} is required")));
    }
    Ok(value.to_string())
}
