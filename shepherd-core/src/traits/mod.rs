//! Storage and collaborator abstraction trait definition

mod booking_repository;
mod category_source;
mod dns_resolver;
mod domain_repository;
mod notifier;
mod source_registry;

pub use booking_repository::BookingRepository;
pub use category_source::{CategorySource, SignalSource};
pub use dns_resolver::DnsResolver;
pub use domain_repository::DomainRepository;
pub use notifier::{NoopNotifier, Notifier};
pub use source_registry::{InMemorySourceRegistry, SourceRegistry};
