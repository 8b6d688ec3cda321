//! Network toolbox utilities for Shepherd
//!
//! Stateless helpers used by the engine adapters: DNS record-value lookups,
//! JSON queries against reputation services and webhook delivery.
//! Independent of the engine's business logic.

mod error;
mod services;
mod types;

pub use error::{ToolboxError, ToolboxResult};
pub use services::{DnsLookup, ToolboxService};
pub use types::DnsQueryType;
