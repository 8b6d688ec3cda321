//! Application bootstrap for Shepherd.
//!
//! Provides `AppState` (service container), `AppStateBuilder` (adapter injection),
//! `AppConfig` (TOML configuration) and the adapters that connect the core engine
//! to `SQLite`, DNS, HTTP reputation sources and the chat webhook.

pub mod adapters;
pub mod config;

use std::sync::Arc;

use shepherd_core::error::{CoreError, CoreResult};
use shepherd_core::services::{BatchOrchestrator, CheckoutService, ImportService, ServiceContext};
use shepherd_core::traits::{
    BookingRepository, DnsResolver, DomainRepository, InMemorySourceRegistry, NoopNotifier,
    Notifier, SourceRegistry,
};
use shepherd_core::types::{BatchSummary, EngineConfig, JobKind, NotificationConfig, SignalKind};

use adapters::{HickoryDnsResolver, HttpCategorySource, HttpSignalSource, SlackNotifier};
use config::SourcesConfig;

/// Platform-agnostic application state.
///
/// Holds the `ServiceContext` and the services built on it. Every entry point
/// constructs this once at startup via `AppStateBuilder`.
pub struct AppState {
    /// Service context (holds all adapters)
    pub ctx: Arc<ServiceContext>,
    /// Periodic jobs
    pub orchestrator: BatchOrchestrator,
    /// Checkout, release and booking edits
    pub checkout_service: CheckoutService,
    /// Bulk CSV import
    pub import_service: ImportService,
    pub engine_config: EngineConfig,
}

impl AppState {
    /// Run one job with its completion notification.
    pub async fn run_job(&self, job: JobKind) -> CoreResult<BatchSummary> {
        self.orchestrator.run_job(job).await
    }

    /// Build the full application from a configuration file's contents.
    ///
    /// Opens the `SQLite` store, registers the configured reputation sources and
    /// selects the webhook notifier when notifications are enabled.
    #[cfg(feature = "sqlite-store")]
    pub async fn from_config(config: &config::AppConfig) -> CoreResult<Self> {
        let store = Arc::new(adapters::SqliteStore::new(&config.database.path).await?);

        let registry = Arc::new(InMemorySourceRegistry::new());
        register_sources(registry.as_ref(), &config.sources, &config.engine).await;

        let mut builder = AppStateBuilder::new()
            .domain_repository(store.clone())
            .booking_repository(store)
            .source_registry(registry)
            .dns_resolver(Arc::new(HickoryDnsResolver::new(
                config.dns.nameserver,
                config.engine.dns_timeout(),
            )))
            .engine_config(config.engine.clone())
            .notification_config(config.notification.clone());

        if config.notification.enabled {
            builder = builder.notifier(Arc::new(SlackNotifier::from_config(&config.notification)?));
        }

        builder.build()
    }
}

/// Register every configured HTTP reputation source.
pub async fn register_sources(
    registry: &dyn SourceRegistry,
    sources: &SourcesConfig,
    engine: &EngineConfig,
) {
    let timeout = engine.lookup_timeout();
    for endpoint in &sources.categories {
        log::debug!("Registering {} source at {}", endpoint.provider, endpoint.url);
        registry
            .register_category_source(Arc::new(HttpCategorySource::new(
                endpoint.provider,
                endpoint.url.clone(),
                timeout,
            )))
            .await;
    }

    let signals = [
        (SignalKind::DnsHealth, &sources.dns_health),
        (SignalKind::MailReputation, &sources.mail_reputation),
    ];
    for (kind, url) in signals {
        if let Some(url) = url {
            log::debug!("Registering {kind} source at {url}");
            registry
                .register_signal_source(Arc::new(HttpSignalSource::new(kind, url.clone(), timeout)))
                .await;
        }
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `domain_repository`: where domain records live
/// - `booking_repository`: where booking history lives
///
/// # Optional
/// - `source_registry`: defaults to an empty `InMemorySourceRegistry`
/// - `dns_resolver`: defaults to the system resolver
/// - `notifier`: defaults to `NoopNotifier`
pub struct AppStateBuilder {
    domain_repository: Option<Arc<dyn DomainRepository>>,
    booking_repository: Option<Arc<dyn BookingRepository>>,
    source_registry: Option<Arc<dyn SourceRegistry>>,
    dns_resolver: Option<Arc<dyn DnsResolver>>,
    notifier: Option<Arc<dyn Notifier>>,
    engine_config: EngineConfig,
    notification_config: NotificationConfig,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            domain_repository: None,
            booking_repository: None,
            source_registry: None,
            dns_resolver: None,
            notifier: None,
            engine_config: EngineConfig::default(),
            notification_config: NotificationConfig::default(),
        }
    }

    #[must_use]
    pub fn domain_repository(mut self, repo: Arc<dyn DomainRepository>) -> Self {
        self.domain_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn booking_repository(mut self, repo: Arc<dyn BookingRepository>) -> Self {
        self.booking_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn source_registry(mut self, registry: Arc<dyn SourceRegistry>) -> Self {
        self.source_registry = Some(registry);
        self
    }

    #[must_use]
    pub fn dns_resolver(mut self, resolver: Arc<dyn DnsResolver>) -> Self {
        self.dns_resolver = Some(resolver);
        self
    }

    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    #[must_use]
    pub fn engine_config(mut self, config: EngineConfig) -> Self {
        self.engine_config = config;
        self
    }

    #[must_use]
    pub fn notification_config(mut self, config: NotificationConfig) -> Self {
        self.notification_config = config;
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub fn build(self) -> CoreResult<AppState> {
        let domain_repository = self.domain_repository.ok_or_else(|| {
            CoreError::ValidationError("domain_repository is required".to_string())
        })?;
        let booking_repository = self.booking_repository.ok_or_else(|| {
            CoreError::ValidationError("booking_repository is required".to_string())
        })?;
        let source_registry = self
            .source_registry
            .unwrap_or_else(|| Arc::new(InMemorySourceRegistry::new()));
        let dns_timeout = self.engine_config.dns_timeout();
        let dns_resolver = self
            .dns_resolver
            .unwrap_or_else(|| Arc::new(HickoryDnsResolver::new(None, dns_timeout)));
        let notifier = self.notifier.unwrap_or_else(|| Arc::new(NoopNotifier));

        let ctx = Arc::new(ServiceContext::new(
            domain_repository,
            booking_repository,
            source_registry,
            dns_resolver,
            notifier,
        ));

        let orchestrator = BatchOrchestrator::new(
            Arc::clone(&ctx),
            self.engine_config.clone(),
            self.notification_config,
        );
        let checkout_service = CheckoutService::new(Arc::clone(&ctx));
        let import_service = ImportService::new(Arc::clone(&ctx));

        Ok(AppState {
            ctx,
            orchestrator,
            checkout_service,
            import_service,
            engine_config: self.engine_config,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
