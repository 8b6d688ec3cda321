//! Test helper module
//!
//! In-memory mocks of every collaborator trait plus factory methods.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::{
    BookingRepository, CategorySource, DnsResolver, DomainRepository, InMemorySourceRegistry,
    Notifier, SignalSource, SourceRegistry,
};
use crate::types::{
    BookingRecord, DnsRecordType, DomainRecord, DomainStatus, HealthUpdate, Observation,
    ProviderId, SignalKind, StatusUpdate,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A booking for `domain_name` that ends on `end_date` and started 30 days earlier.
pub fn booking(domain_name: &str, end_date: NaiveDate) -> BookingRecord {
    BookingRecord {
        id: uuid::Uuid::new_v4().to_string(),
        start_date: end_date.checked_sub_days(Days::new(30)).unwrap(),
        end_date,
        client: "ACME".to_string(),
        domain_name: domain_name.to_string(),
        operator: Some("alice".to_string()),
        project_type: "Red Team".to_string(),
        activity_type: "Command and Control".to_string(),
        note: None,
        slack_channel: None,
    }
}

// ===== MockDomainRepository =====

pub struct MockDomainRepository {
    domains: RwLock<HashMap<String, DomainRecord>>,
    /// Writes to these names fail with `StorageError`
    failing_writes: RwLock<HashSet<String>>,
    fail_reads: RwLock<bool>,
}

impl MockDomainRepository {
    pub fn new() -> Self {
        Self {
            domains: RwLock::new(HashMap::new()),
            failing_writes: RwLock::new(HashSet::new()),
            fail_reads: RwLock::new(false),
        }
    }

    pub async fn seed(&self, domain: DomainRecord) {
        self.domains
            .write()
            .await
            .insert(domain.name.clone(), domain);
    }

    pub async fn get(&self, name: &str) -> Option<DomainRecord> {
        self.domains.read().await.get(name).cloned()
    }

    pub async fn fail_writes_for(&self, name: &str) {
        self.failing_writes.write().await.insert(name.to_string());
    }

    pub async fn fail_reads(&self) {
        *self.fail_reads.write().await = true;
    }

    async fn check_read(&self) -> CoreResult<()> {
        if *self.fail_reads.read().await {
            return Err(CoreError::StorageError("read failed".to_string()));
        }
        Ok(())
    }

    async fn modify(&self, name: &str, f: impl FnOnce(&mut DomainRecord)) -> CoreResult<()> {
        if self.failing_writes.read().await.contains(name) {
            return Err(CoreError::StorageError(format!("write failed for {name}")));
        }
        let mut store = self.domains.write().await;
        let domain = store
            .get_mut(name)
            .ok_or_else(|| CoreError::DomainNotFound(name.to_string()))?;
        f(domain);
        Ok(())
    }

    async fn sorted(&self, filter: impl Fn(&DomainRecord) -> bool) -> Vec<DomainRecord> {
        let mut domains: Vec<_> = self
            .domains
            .read()
            .await
            .values()
            .filter(|d| filter(d))
            .cloned()
            .collect();
        domains.sort_by(|a, b| a.name.cmp(&b.name));
        domains
    }
}

#[async_trait]
impl DomainRepository for MockDomainRepository {
    async fn find_all(&self) -> CoreResult<Vec<DomainRecord>> {
        self.check_read().await?;
        Ok(self.sorted(|_| true).await)
    }

    async fn find_by_name(&self, name: &str) -> CoreResult<Option<DomainRecord>> {
        self.check_read().await?;
        Ok(self.get(name).await)
    }

    async fn find_by_status(&self, status: DomainStatus) -> CoreResult<Vec<DomainRecord>> {
        self.check_read().await?;
        Ok(self.sorted(|d| d.domain_status == status).await)
    }

    async fn insert(&self, domain: &DomainRecord) -> CoreResult<()> {
        let mut store = self.domains.write().await;
        if store.contains_key(&domain.name) {
            return Err(CoreError::DomainExists(domain.name.clone()));
        }
        store.insert(domain.name.clone(), domain.clone());
        Ok(())
    }

    async fn update_health(&self, name: &str, update: &HealthUpdate) -> CoreResult<()> {
        self.modify(name, |d| d.apply_health(update)).await
    }

    async fn update_dns_record(&self, name: &str, blob: &str) -> CoreResult<()> {
        self.modify(name, |d| d.dns_record = Some(blob.to_string()))
            .await
    }

    async fn update_status(&self, name: &str, update: &StatusUpdate) -> CoreResult<()> {
        self.modify(name, |d| d.apply_status(update)).await
    }
}

// ===== MockBookingRepository =====

pub struct MockBookingRepository {
    bookings: RwLock<Vec<BookingRecord>>,
}

impl MockBookingRepository {
    pub fn new() -> Self {
        Self {
            bookings: RwLock::new(Vec::new()),
        }
    }

    pub async fn seed(&self, booking: BookingRecord) {
        self.bookings.write().await.push(booking);
    }

    pub async fn all(&self) -> Vec<BookingRecord> {
        self.bookings.read().await.clone()
    }
}

#[async_trait]
impl BookingRepository for MockBookingRepository {
    async fn find_by_domain(&self, domain_name: &str) -> CoreResult<Vec<BookingRecord>> {
        Ok(self
            .bookings
            .read()
            .await
            .iter()
            .filter(|b| b.domain_name == domain_name)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<BookingRecord>> {
        Ok(self
            .bookings
            .read()
            .await
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn insert(&self, booking: &BookingRecord) -> CoreResult<()> {
        self.bookings.write().await.push(booking.clone());
        Ok(())
    }

    async fn update_end_date(&self, id: &str, end_date: NaiveDate) -> CoreResult<()> {
        let mut bookings = self.bookings.write().await;
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| CoreError::BookingNotFound(id.to_string()))?;
        booking.end_date = end_date;
        Ok(())
    }
}

// ===== Category / signal sources =====

/// Answers from a fixed table; unknown domains get no category.
pub struct StaticCategorySource {
    provider: ProviderId,
    entries: HashMap<String, (String, bool)>,
    failing: Vec<String>,
}

impl StaticCategorySource {
    pub fn new(provider: ProviderId) -> Self {
        Self {
            provider,
            entries: HashMap::new(),
            failing: Vec::new(),
        }
    }

    /// Lookups for `domain_name` return a network error.
    pub fn failing_for(mut self, domain_name: &str) -> Self {
        self.failing.push(domain_name.to_string());
        self
    }

    pub fn with(mut self, domain_name: &str, category: &str, is_bad: bool) -> Self {
        self.entries
            .insert(domain_name.to_string(), (category.to_string(), is_bad));
        self
    }
}

#[async_trait]
impl CategorySource for StaticCategorySource {
    fn provider(&self) -> ProviderId {
        self.provider
    }

    async fn lookup(&self, domain_name: &str) -> CoreResult<Option<Observation>> {
        if self.failing.iter().any(|d| d == domain_name) {
            return Err(CoreError::NetworkError(format!(
                "{} rejected {domain_name}",
                self.provider
            )));
        }
        Ok(self.entries.get(domain_name).map(|(category, is_bad)| {
            Observation::new(domain_name, self.provider, category.clone(), *is_bad)
        }))
    }
}

/// Always fails with a network error.
pub struct FailingCategorySource {
    provider: ProviderId,
}

impl FailingCategorySource {
    pub fn new(provider: ProviderId) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl CategorySource for FailingCategorySource {
    fn provider(&self) -> ProviderId {
        self.provider
    }

    async fn lookup(&self, _domain_name: &str) -> CoreResult<Option<Observation>> {
        Err(CoreError::NetworkError(format!(
            "{} is unreachable",
            self.provider
        )))
    }
}

/// Never answers.
pub struct HangingCategorySource {
    provider: ProviderId,
}

impl HangingCategorySource {
    pub fn new(provider: ProviderId) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl CategorySource for HangingCategorySource {
    fn provider(&self) -> ProviderId {
        self.provider
    }

    async fn lookup(&self, _domain_name: &str) -> CoreResult<Option<Observation>> {
        std::future::pending().await
    }
}

pub struct StaticSignalSource {
    kind: SignalKind,
    entries: HashMap<String, String>,
}

impl StaticSignalSource {
    pub fn new(kind: SignalKind) -> Self {
        Self {
            kind,
            entries: HashMap::new(),
        }
    }

    pub fn with(mut self, domain_name: &str, value: &str) -> Self {
        self.entries
            .insert(domain_name.to_string(), value.to_string());
        self
    }
}

#[async_trait]
impl SignalSource for StaticSignalSource {
    fn kind(&self) -> SignalKind {
        self.kind
    }

    async fn lookup(&self, domain_name: &str) -> CoreResult<Option<String>> {
        Ok(self.entries.get(domain_name).cloned())
    }
}

// ===== MockDnsResolver =====

pub struct MockDnsResolver {
    records: RwLock<HashMap<(String, DnsRecordType), Vec<String>>>,
    failures: RwLock<HashSet<(String, DnsRecordType)>>,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            failures: RwLock::new(HashSet::new()),
        }
    }

    pub async fn set(&self, name: &str, record_type: DnsRecordType, values: &[&str]) {
        self.records.write().await.insert(
            (name.to_string(), record_type),
            values.iter().map(|v| (*v).to_string()).collect(),
        );
    }

    pub async fn fail(&self, name: &str, record_type: DnsRecordType) {
        self.failures
            .write()
            .await
            .insert((name.to_string(), record_type));
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn lookup(&self, name: &str, record_type: DnsRecordType) -> CoreResult<Vec<String>> {
        let key = (name.to_string(), record_type);
        if self.failures.read().await.contains(&key) {
            return Err(CoreError::NetworkError(format!("SERVFAIL for {name}")));
        }
        Ok(self
            .records
            .read()
            .await
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }
}

// ===== RecordingNotifier =====

pub struct RecordingNotifier {
    messages: RwLock<Vec<String>>,
    attempts: RwLock<usize>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            messages: RwLock::new(Vec::new()),
            attempts: RwLock::new(0),
            fail: false,
        }
    }

    /// Every delivery attempt fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub async fn messages(&self) -> Vec<String> {
        self.messages.read().await.clone()
    }

    pub async fn attempts(&self) -> usize {
        *self.attempts.read().await
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: &str) -> CoreResult<()> {
        *self.attempts.write().await += 1;
        if self.fail {
            return Err(CoreError::NetworkError("webhook returned 500".to_string()));
        }
        self.messages.write().await.push(message.to_string());
        Ok(())
    }
}

// ===== Factory methods =====

pub struct TestContext {
    pub ctx: Arc<ServiceContext>,
    pub domains: Arc<MockDomainRepository>,
    pub bookings: Arc<MockBookingRepository>,
    pub registry: Arc<InMemorySourceRegistry>,
    pub resolver: Arc<MockDnsResolver>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestContext {
    pub async fn register_category(&self, source: impl CategorySource + 'static) {
        self.registry
            .register_category_source(Arc::new(source))
            .await;
    }

    pub async fn register_signal(&self, source: impl SignalSource + 'static) {
        self.registry.register_signal_source(Arc::new(source)).await;
    }
}

/// Create a `ServiceContext` for tests
pub fn create_test_context() -> TestContext {
    let domains = Arc::new(MockDomainRepository::new());
    let bookings = Arc::new(MockBookingRepository::new());
    let registry = Arc::new(InMemorySourceRegistry::new());
    let resolver = Arc::new(MockDnsResolver::new());
    let notifier = Arc::new(RecordingNotifier::new());

    let ctx = Arc::new(ServiceContext::new(
        domains.clone(),
        bookings.clone(),
        registry.clone(),
        resolver.clone(),
        notifier.clone(),
    ));

    TestContext {
        ctx,
        domains,
        bookings,
        registry,
        resolver,
        notifier,
    }
}
