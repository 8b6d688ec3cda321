//! Bulk CSV import of domains.

use std::io::Read;
use std::sync::Arc;

use serde::Deserialize;

use super::ServiceContext;
use crate::error::{CoreError, CoreResult};
use crate::types::{
    CategorySlots, DomainRecord, DomainStatus, HealthStatus, ImportFailure, ImportResult,
    WhoisStatus,
};
use crate::utils::date::parse_date;

/// What to do when a row cannot be imported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImportPolicy {
    /// Stop at the first failed row; rows before it stay imported
    #[default]
    HaltOnError,
    /// Report the failed row and continue with the next one
    SkipInvalid,
}

/// One CSV row, keyed by header name. Unknown columns are ignored.
#[derive(Debug, Deserialize)]
struct ImportRow {
    name: String,
    creation: String,
    expiration: String,
    #[serde(default)]
    registrar: Option<String>,
    #[serde(default)]
    dns_record: Option<String>,
    #[serde(default)]
    health_status: Option<String>,
    #[serde(default)]
    health_dns: Option<String>,
    #[serde(default)]
    mail_status: Option<String>,
    #[serde(default)]
    burned_explanation: Option<String>,
    #[serde(default)]
    domain_status: Option<String>,
    #[serde(default)]
    whois_status: Option<String>,
    #[serde(default)]
    all_categories: Option<String>,
    #[serde(default)]
    talos: Option<String>,
    #[serde(default)]
    opendns: Option<String>,
    #[serde(default)]
    bluecoat: Option<String>,
    #[serde(default)]
    xforce: Option<String>,
    #[serde(default)]
    trendmicro: Option<String>,
    #[serde(default)]
    fortiguard: Option<String>,
    #[serde(default)]
    note: Option<String>,
}

impl ImportRow {
    fn into_record(self) -> CoreResult<DomainRecord> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(CoreError::ValidationError("name is required".to_string()));
        }
        let creation = parse_date(&self.creation)
            .map_err(|e| CoreError::ValidationError(format!("creation: {e}")))?;
        let expiration = parse_date(&self.expiration)
            .map_err(|e| CoreError::ValidationError(format!("expiration: {e}")))?;

        let mut record = DomainRecord::new(name, creation, expiration);
        record.registrar = non_empty(self.registrar);
        record.dns_record = non_empty(self.dns_record);
        record.health_status = non_empty(self.health_status)
            .map_or(HealthStatus::Healthy, |label| HealthStatus::from_label(&label));
        record.domain_status = non_empty(self.domain_status)
            .and_then(|label| DomainStatus::from_label(&label))
            .unwrap_or(DomainStatus::Available);
        record.whois_status = non_empty(self.whois_status)
            .and_then(|label| WhoisStatus::from_label(&label))
            .unwrap_or(WhoisStatus::Enabled);
        record.health_dns = non_empty(self.health_dns);
        record.mail_status = non_empty(self.mail_status);
        record.burned_explanation = non_empty(self.burned_explanation);
        record.all_categories = non_empty(self.all_categories);
        record.categories = CategorySlots {
            talos: non_empty(self.talos),
            opendns: non_empty(self.opendns),
            bluecoat: non_empty(self.bluecoat),
            xforce: non_empty(self.xforce),
            trendmicro: non_empty(self.trendmicro),
            fortiguard: non_empty(self.fortiguard),
        };
        record.note = non_empty(self.note);
        Ok(record)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A parsed row: its 1-based data row number, the name as written, and the
/// converted record.
type ParsedRow = (usize, String, CoreResult<DomainRecord>);

/// Bulk import service
pub struct ImportService {
    ctx: Arc<ServiceContext>,
}

impl ImportService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Import domains from comma-separated text with a header row.
    ///
    /// Row problems are reported in the result according to `policy`.
    ///
    /// # Errors
    /// Only when the header row cannot be read.
    pub async fn import_csv<R: Read>(
        &self,
        reader: R,
        policy: ImportPolicy,
    ) -> CoreResult<ImportResult> {
        let rows = parse_rows(reader)?;
        let mut result = ImportResult::default();

        for (row, name, record) in rows {
            let outcome = match record {
                Ok(record) => self.ctx.domain_repository.insert(&record).await,
                Err(e) => Err(e),
            };

            match outcome {
                Ok(()) => {
                    log::info!("[import] Added {name}");
                    result.imported.push(name);
                }
                Err(e) => {
                    let error = CoreError::ImportError {
                        row,
                        domain: name.clone(),
                        reason: e.to_string(),
                    };
                    log::warn!("[import] {error}");
                    result.failures.push(ImportFailure {
                        row,
                        domain_name: name,
                        reason: e.to_string(),
                    });
                    if policy == ImportPolicy::HaltOnError {
                        result.halted = true;
                        break;
                    }
                }
            }
        }

        Ok(result)
    }
}

/// Build the error for the first failure of a result, if any.
#[must_use]
pub fn first_import_error(result: &ImportResult) -> Option<CoreError> {
    result.failures.first().map(|f| CoreError::ImportError {
        row: f.row,
        domain: f.domain_name.clone(),
        reason: f.reason.clone(),
    })
}

fn parse_rows<R: Read>(reader: R) -> CoreResult<Vec<ParsedRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| CoreError::ValidationError(format!("Unable to read header row: {e}")))?
        .clone();
    let name_index = headers.iter().position(|h| h == "name");

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let parsed = match record {
            Ok(record) => {
                let name = name_index
                    .and_then(|i| record.get(i))
                    .unwrap_or_default()
                    .to_string();
                let converted = record
                    .deserialize::<ImportRow>(Some(&headers))
                    .map_err(|e| CoreError::ValidationError(e.to_string()))
                    .and_then(ImportRow::into_record);
                (row, name, converted)
            }
            Err(e) => (
                row,
                String::new(),
                Err(CoreError::ValidationError(e.to_string())),
            ),
        };
        rows.push(parsed);
    }
    Ok(rows)
}
