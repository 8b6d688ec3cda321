//! Domain persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{DomainRecord, DomainStatus, HealthUpdate, StatusUpdate};

/// Domain record repository Trait
///
/// Writes are split by field group: the health cycle, the DNS cycle and user
/// actions each own a disjoint set of columns, so concurrent cycles never
/// overwrite each other's fields with stale values.
///
/// Platform implementation:
/// - `SqliteStore` (`SeaORM`)
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// Get all tracked domains.
    ///
    /// Rows that cannot be read are left out and logged rather than failing the listing.
    async fn find_all(&self) -> CoreResult<Vec<DomainRecord>>;

    /// Get a domain by its name
    ///
    /// # Arguments
    /// * `name` - Domain name
    async fn find_by_name(&self, name: &str) -> CoreResult<Option<DomainRecord>>;

    /// Get every domain in the given availability status
    async fn find_by_status(&self, status: DomainStatus) -> CoreResult<Vec<DomainRecord>>;

    /// Insert a new domain
    ///
    /// # Errors
    /// `CoreError::DomainExists` if the name is already tracked
    async fn insert(&self, domain: &DomainRecord) -> CoreResult<()>;

    /// Persist the health-cycle field group
    ///
    /// # Errors
    /// `CoreError::DomainNotFound` if the name is unknown
    async fn update_health(&self, name: &str, update: &HealthUpdate) -> CoreResult<()>;

    /// Persist the DNS record blob
    async fn update_dns_record(&self, name: &str, blob: &str) -> CoreResult<()>;

    /// Persist an availability transition
    async fn update_status(&self, name: &str, update: &StatusUpdate) -> CoreResult<()>;
}
