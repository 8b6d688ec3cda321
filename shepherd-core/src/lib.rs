//! Shepherd Core Library
//!
//! Domain health evaluation and lifecycle reconciliation engine, including:
//! - Category aggregation across reputation sources
//! - Burned-state evaluation
//! - DNS record aggregation into the stored record blob
//! - Release of domains whose bookings have all expired
//! - Batch orchestration of the periodic jobs
//!
//! This library is platform-independent: storage, DNS resolution, reputation sources
//! and the notification sink are all abstracted behind traits.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::ServiceContext;
pub use traits::{
    BookingRepository, CategorySource, DnsResolver, DomainRepository, Notifier, SignalSource,
    SourceRegistry,
};
