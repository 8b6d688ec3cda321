//! Reputation source adapters

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{Observation, ProviderId, SignalKind};

/// A threat-intelligence category provider.
///
/// `Ok(None)` means the provider answered without a usable category. Errors are
/// allowed here; the health cycle turns them (and timeouts) into no-data.
#[async_trait]
pub trait CategorySource: Send + Sync {
    /// Slot this source fills
    fn provider(&self) -> ProviderId;

    async fn lookup(&self, domain_name: &str) -> CoreResult<Option<Observation>>;
}

/// A single-valued health signal (passive DNS health, mail reputation).
#[async_trait]
pub trait SignalSource: Send + Sync {
    fn kind(&self) -> SignalKind;

    /// Raw status label, `None` when the source has nothing for the domain
    async fn lookup(&self, domain_name: &str) -> CoreResult<Option<String>>;
}
