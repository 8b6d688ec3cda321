//! `DomainRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, sea_query::Expr,
};

use shepherd_core::error::{CoreError, CoreResult};
use shepherd_core::traits::DomainRepository;
use shepherd_core::types::{
    CategorySlots, DomainRecord, DomainStatus, HealthStatus, HealthUpdate, StatusUpdate,
    WhoisStatus,
};

use super::entity::domain;
use super::{format_date, parse_stored_date, SqliteStore};

impl domain::Model {
    /// Convert a `SeaORM` row model into a `DomainRecord`.
    fn into_record(self) -> CoreResult<DomainRecord> {
        let creation = parse_stored_date("creation", &self.creation)?;
        let expiration = parse_stored_date("expiration", &self.expiration)?;
        let domain_status = DomainStatus::from_label(&self.domain_status).ok_or_else(|| {
            CoreError::SerializationError(format!("Invalid domain_status: {}", self.domain_status))
        })?;
        let whois_status = WhoisStatus::from_label(&self.whois_status).ok_or_else(|| {
            CoreError::SerializationError(format!("Invalid whois_status: {}", self.whois_status))
        })?;

        Ok(DomainRecord {
            name: self.name,
            registrar: self.registrar,
            creation,
            expiration,
            dns_record: self.dns_record,
            categories: CategorySlots {
                talos: self.talos,
                opendns: self.opendns,
                bluecoat: self.bluecoat,
                xforce: self.xforce,
                trendmicro: self.trendmicro,
                fortiguard: self.fortiguard,
            },
            all_categories: self.all_categories,
            health_status: HealthStatus::from_label(&self.health_status),
            health_dns: self.health_dns,
            mail_status: self.mail_status,
            burned_explanation: self.burned_explanation,
            domain_status,
            whois_status,
            last_used_by: self.last_used_by,
            note: self.note,
        })
    }
}

fn record_to_active_model(record: &DomainRecord) -> domain::ActiveModel {
    let slots = &record.categories;
    domain::ActiveModel {
        name: Set(record.name.clone()),
        registrar: Set(record.registrar.clone()),
        creation: Set(format_date(record.creation)),
        expiration: Set(format_date(record.expiration)),
        dns_record: Set(record.dns_record.clone()),
        talos: Set(slots.talos.clone()),
        opendns: Set(slots.opendns.clone()),
        bluecoat: Set(slots.bluecoat.clone()),
        xforce: Set(slots.xforce.clone()),
        trendmicro: Set(slots.trendmicro.clone()),
        fortiguard: Set(slots.fortiguard.clone()),
        all_categories: Set(record.all_categories.clone()),
        health_status: Set(record.health_status.as_str().to_string()),
        health_dns: Set(record.health_dns.clone()),
        mail_status: Set(record.mail_status.clone()),
        burned_explanation: Set(record.burned_explanation.clone()),
        domain_status: Set(record.domain_status.as_str().to_string()),
        whois_status: Set(record.whois_status.as_str().to_string()),
        last_used_by: Set(record.last_used_by.clone()),
        note: Set(record.note.clone()),
    }
}

/// Convert listed rows, dropping the ones that cannot be read so one bad row
/// does not hide every other domain from a batch.
fn readable_records(rows: Vec<domain::Model>) -> Vec<DomainRecord> {
    rows.into_iter()
        .filter_map(|row| {
            let name = row.name.clone();
            match row.into_record() {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("[sqlite] Skipping unreadable domain {name}: {e}");
                    None
                }
            }
        })
        .collect()
}

fn not_found_if_untouched(rows_affected: u64, name: &str) -> CoreResult<()> {
    if rows_affected == 0 {
        return Err(CoreError::DomainNotFound(name.to_string()));
    }
    Ok(())
}

#[async_trait]
impl DomainRepository for SqliteStore {
    async fn find_all(&self) -> CoreResult<Vec<DomainRecord>> {
        let rows = domain::Entity::find()
            .order_by_asc(domain::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query domains: {e}")))?;

        Ok(readable_records(rows))
    }

    async fn find_by_name(&self, name: &str) -> CoreResult<Option<DomainRecord>> {
        let row = domain::Entity::find_by_id(name)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query domain: {e}")))?;

        row.map(domain::Model::into_record).transpose()
    }

    async fn find_by_status(&self, status: DomainStatus) -> CoreResult<Vec<DomainRecord>> {
        let rows = domain::Entity::find()
            .filter(domain::Column::DomainStatus.eq(status.as_str()))
            .order_by_asc(domain::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query domains: {e}")))?;

        Ok(readable_records(rows))
    }

    async fn insert(&self, record: &DomainRecord) -> CoreResult<()> {
        if self.find_by_name(&record.name).await?.is_some() {
            return Err(CoreError::DomainExists(record.name.clone()));
        }

        domain::Entity::insert(record_to_active_model(record))
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to insert domain: {e}")))?;

        Ok(())
    }

    async fn update_health(&self, name: &str, update: &HealthUpdate) -> CoreResult<()> {
        let slots = &update.categories;
        let mut query = domain::Entity::update_many()
            .col_expr(
                domain::Column::HealthStatus,
                Expr::value(update.health_status.as_str().to_string()),
            )
            .col_expr(domain::Column::HealthDns, Expr::value(update.health_dns.clone()))
            .col_expr(domain::Column::MailStatus, Expr::value(update.mail_status.clone()))
            .col_expr(
                domain::Column::BurnedExplanation,
                Expr::value(update.burned_explanation.clone()),
            )
            .col_expr(
                domain::Column::AllCategories,
                Expr::value(update.all_categories.clone()),
            )
            .col_expr(domain::Column::Talos, Expr::value(slots.talos.clone()))
            .col_expr(domain::Column::Opendns, Expr::value(slots.opendns.clone()))
            .col_expr(domain::Column::Bluecoat, Expr::value(slots.bluecoat.clone()))
            .col_expr(domain::Column::Xforce, Expr::value(slots.xforce.clone()))
            .col_expr(domain::Column::Trendmicro, Expr::value(slots.trendmicro.clone()))
            .col_expr(domain::Column::Fortiguard, Expr::value(slots.fortiguard.clone()));

        if update.mark_burned {
            query = query.col_expr(
                domain::Column::DomainStatus,
                Expr::value(DomainStatus::Burned.as_str()),
            );
        }

        let result = query
            .filter(domain::Column::Name.eq(name))
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to save health of {name}: {e}")))?;

        not_found_if_untouched(result.rows_affected, name)
    }

    async fn update_dns_record(&self, name: &str, blob: &str) -> CoreResult<()> {
        let result = domain::Entity::update_many()
            .col_expr(domain::Column::DnsRecord, Expr::value(blob))
            .filter(domain::Column::Name.eq(name))
            .exec(&self.db)
            .await
            .map_err(|e| {
                CoreError::StorageError(format!("Failed to save DNS record of {name}: {e}"))
            })?;

        not_found_if_untouched(result.rows_affected, name)
    }

    async fn update_status(&self, name: &str, update: &StatusUpdate) -> CoreResult<()> {
        let mut query = domain::Entity::update_many().col_expr(
            domain::Column::DomainStatus,
            Expr::value(update.domain_status.as_str()),
        );
        if let Some(ref user) = update.last_used_by {
            query = query.col_expr(domain::Column::LastUsedBy, Expr::value(user.clone()));
        }

        let result = query
            .filter(domain::Column::Name.eq(name))
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to save status of {name}: {e}")))?;

        not_found_if_untouched(result.rows_affected, name)
    }
}
