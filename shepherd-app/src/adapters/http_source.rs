//! Reputation sources backed by a JSON HTTP endpoint.
//!
//! Each endpoint is queried as `GET <url>?domain=<name>`. Category endpoints answer
//! `{"category": "...", "is_bad": bool}` (the category may also be a list of labels);
//! signal endpoints answer `{"status": "..."}`. A missing or blank label means the
//! source has no data for the domain.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use shepherd_core::error::{CoreError, CoreResult};
use shepherd_core::traits::{CategorySource, SignalSource};
use shepherd_core::types::{Observation, ProviderId, SignalKind};
use shepherd_toolbox::ToolboxService;

use super::toolbox_error;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CategoryLabel {
    One(String),
    Many(Vec<String>),
}

impl CategoryLabel {
    fn into_text(self) -> String {
        match self {
            Self::One(label) => label.trim().to_string(),
            Self::Many(labels) => labels
                .iter()
                .map(|l| l.trim())
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CategoryResponse {
    #[serde(default)]
    category: Option<CategoryLabel>,
    #[serde(default)]
    is_bad: bool,
}

#[derive(Debug, Deserialize)]
struct SignalResponse {
    #[serde(default)]
    status: Option<String>,
}

fn parse_category(
    provider: ProviderId,
    domain_name: &str,
    body: Value,
) -> CoreResult<Option<Observation>> {
    let response: CategoryResponse = serde_json::from_value(body).map_err(|e| {
        CoreError::SerializationError(format!("Unexpected {provider} response: {e}"))
    })?;

    let Some(label) = response.category.map(CategoryLabel::into_text) else {
        return Ok(None);
    };
    if label.is_empty() {
        return Ok(None);
    }
    Ok(Some(Observation::new(
        domain_name,
        provider,
        label,
        response.is_bad,
    )))
}

fn parse_signal(kind: SignalKind, body: Value) -> CoreResult<Option<String>> {
    let response: SignalResponse = serde_json::from_value(body)
        .map_err(|e| CoreError::SerializationError(format!("Unexpected {kind} response: {e}")))?;
    Ok(response
        .status
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Category provider reached over HTTP.
pub struct HttpCategorySource {
    provider: ProviderId,
    url: String,
    timeout: Duration,
}

impl HttpCategorySource {
    #[must_use]
    pub fn new(provider: ProviderId, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            provider,
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl CategorySource for HttpCategorySource {
    fn provider(&self) -> ProviderId {
        self.provider
    }

    async fn lookup(&self, domain_name: &str) -> CoreResult<Option<Observation>> {
        let body = ToolboxService::fetch_json(&self.url, &[("domain", domain_name)], self.timeout)
            .await
            .map_err(|e| toolbox_error(&format!("{} lookup", self.provider), e))?;
        parse_category(self.provider, domain_name, body)
    }
}

/// Health signal (passive DNS or mail reputation) reached over HTTP.
pub struct HttpSignalSource {
    kind: SignalKind,
    url: String,
    timeout: Duration,
}

impl HttpSignalSource {
    #[must_use]
    pub fn new(kind: SignalKind, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            kind,
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl SignalSource for HttpSignalSource {
    fn kind(&self) -> SignalKind {
        self.kind
    }

    async fn lookup(&self, domain_name: &str) -> CoreResult<Option<String>> {
        let body = ToolboxService::fetch_json(&self.url, &[("domain", domain_name)], self.timeout)
            .await
            .map_err(|e| toolbox_error(&format!("{} lookup", self.kind), e))?;
        parse_signal(self.kind, body)
    }
}
