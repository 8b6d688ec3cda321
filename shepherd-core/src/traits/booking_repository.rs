//! Booking persistence abstract Trait

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::CoreResult;
use crate::types::BookingRecord;

/// Booking history repository Trait
///
/// Bookings are never deleted by the engine.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Every booking that references the domain, oldest first
    async fn find_by_domain(&self, domain_name: &str) -> CoreResult<Vec<BookingRecord>>;

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<BookingRecord>>;

    async fn insert(&self, booking: &BookingRecord) -> CoreResult<()>;

    /// Change a booking's end date
    ///
    /// # Errors
    /// `CoreError::BookingNotFound` if the id is unknown
    async fn update_end_date(&self, id: &str, end_date: NaiveDate) -> CoreResult<()>;
}
