//! Reputation source registry abstract Trait

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{CategorySource, SignalSource};
use crate::types::{ProviderId, SignalKind};

/// Source Registry Trait
///
/// Holds every reputation source the health cycle queries.
/// Registering a second source for the same provider or signal replaces the first.
#[async_trait]
pub trait SourceRegistry: Send + Sync {
    /// Register a category source under its provider slot
    async fn register_category_source(&self, source: Arc<dyn CategorySource>);

    /// Register a health signal source under its kind
    async fn register_signal_source(&self, source: Arc<dyn SignalSource>);

    /// Remove the source filling a provider slot
    async fn unregister_category_source(&self, provider: ProviderId);

    /// Category sources in provider order
    async fn category_sources(&self) -> Vec<Arc<dyn CategorySource>>;

    async fn signal_source(&self, kind: SignalKind) -> Option<Arc<dyn SignalSource>>;
}

/// In-memory source registry
#[derive(Clone, Default)]
pub struct InMemorySourceRegistry {
    categories: Arc<RwLock<Vec<Arc<dyn CategorySource>>>>,
    signals: Arc<RwLock<Vec<Arc<dyn SignalSource>>>>,
}

impl InMemorySourceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SourceRegistry for InMemorySourceRegistry {
    async fn register_category_source(&self, source: Arc<dyn CategorySource>) {
        let mut sources = self.categories.write().await;
        sources.retain(|s| s.provider() != source.provider());
        sources.push(source);
        sources.sort_by_key(|s| s.provider());
    }

    async fn register_signal_source(&self, source: Arc<dyn SignalSource>) {
        let mut sources = self.signals.write().await;
        sources.retain(|s| s.kind() != source.kind());
        sources.push(source);
    }

    async fn unregister_category_source(&self, provider: ProviderId) {
        self.categories
            .write()
            .await
            .retain(|s| s.provider() != provider);
    }

    async fn category_sources(&self) -> Vec<Arc<dyn CategorySource>> {
        self.categories.read().await.clone()
    }

    async fn signal_source(&self, kind: SignalKind) -> Option<Arc<dyn SignalSource>> {
        self.signals
            .read()
            .await
            .iter()
            .find(|s| s.kind() == kind)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FailingCategorySource, StaticCategorySource, StaticSignalSource};

    #[tokio::test]
    async fn category_sources_come_back_in_provider_order() {
        let registry = InMemorySourceRegistry::new();
        registry
            .register_category_source(Arc::new(StaticCategorySource::new(ProviderId::Fortiguard)))
            .await;
        registry
            .register_category_source(Arc::new(StaticCategorySource::new(ProviderId::Talos)))
            .await;

        let providers: Vec<_> = registry
            .category_sources()
            .await
            .iter()
            .map(|s| s.provider())
            .collect();
        assert_eq!(providers, vec![ProviderId::Talos, ProviderId::Fortiguard]);
    }

    #[tokio::test]
    async fn registering_same_provider_replaces_source() {
        let registry = InMemorySourceRegistry::new();
        registry
            .register_category_source(Arc::new(StaticCategorySource::new(ProviderId::Talos)))
            .await;
        registry
            .register_category_source(Arc::new(FailingCategorySource::new(ProviderId::Talos)))
            .await;

        let sources = registry.category_sources().await;
        assert_eq!(sources.len(), 1);
        assert!(sources[0].lookup("example.com").await.is_err());

        registry.unregister_category_source(ProviderId::Talos).await;
        assert!(registry.category_sources().await.is_empty());
    }

    #[tokio::test]
    async fn signal_source_lookup_by_kind() {
        let registry = InMemorySourceRegistry::new();
        registry
            .register_signal_source(Arc::new(StaticSignalSource::new(SignalKind::DnsHealth)))
            .await;
        assert!(registry.signal_source(SignalKind::DnsHealth).await.is_some());
        assert!(registry.signal_source(SignalKind::MailReputation).await.is_none());
    }
}
