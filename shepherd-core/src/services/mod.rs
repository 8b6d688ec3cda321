//! Business logic service layer

mod batch_service;
pub mod burned_evaluator;
pub mod category_aggregator;
mod checkout_service;
mod dns_record_service;
mod health_check_service;
mod import_service;
mod notification_service;
mod release_service;

pub use batch_service::BatchOrchestrator;
pub use burned_evaluator::evaluate;
pub use category_aggregator::aggregate;
pub use checkout_service::CheckoutService;
pub use dns_record_service::DnsRecordService;
pub use health_check_service::{HealthCheckOutcome, HealthCheckService};
pub use import_service::{first_import_error, ImportPolicy, ImportService};
pub use notification_service::{
    burned_message, job_completed_message, job_failed_message, NotificationService,
};
pub use release_service::{is_release_eligible, ReleaseService};

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};
use crate::traits::{BookingRepository, DnsResolver, DomainRepository, Notifier, SourceRegistry};

/// Service context - holds all dependencies
///
/// The platform layer builds this context and injects its storage, resolver,
/// source and notification implementations.
pub struct ServiceContext {
    /// Domain record repository
    pub domain_repository: Arc<dyn DomainRepository>,
    /// Booking history repository
    pub booking_repository: Arc<dyn BookingRepository>,
    /// Registered reputation sources
    pub source_registry: Arc<dyn SourceRegistry>,
    /// DNS record lookups
    pub dns_resolver: Arc<dyn DnsResolver>,
    /// Outbound notification sink
    pub notifier: Arc<dyn Notifier>,
}

impl ServiceContext {
    /// Create a service context
    #[must_use]
    pub fn new(
        domain_repository: Arc<dyn DomainRepository>,
        booking_repository: Arc<dyn BookingRepository>,
        source_registry: Arc<dyn SourceRegistry>,
        dns_resolver: Arc<dyn DnsResolver>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            domain_repository,
            booking_repository,
            source_registry,
            dns_resolver,
            notifier,
        }
    }
}

/// Run an external call with an upper time bound.
pub(crate) async fn bounded<T, F>(limit: Duration, call: F) -> CoreResult<T>
where
    F: Future<Output = CoreResult<T>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| CoreError::Timeout(format!("no answer within {}s", limit.as_secs())))?
}
