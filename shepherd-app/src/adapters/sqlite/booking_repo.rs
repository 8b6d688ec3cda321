//! `BookingRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, sea_query::Expr,
};

use shepherd_core::error::{CoreError, CoreResult};
use shepherd_core::traits::BookingRepository;
use shepherd_core::types::BookingRecord;

use super::entity::booking;
use super::{format_date, parse_stored_date, SqliteStore};

impl booking::Model {
    fn into_record(self) -> CoreResult<BookingRecord> {
        Ok(BookingRecord {
            start_date: parse_stored_date("start_date", &self.start_date)?,
            end_date: parse_stored_date("end_date", &self.end_date)?,
            id: self.id,
            client: self.client,
            domain_name: self.domain_name,
            operator: self.operator,
            project_type: self.project_type,
            activity_type: self.activity_type,
            note: self.note,
            slack_channel: self.slack_channel,
        })
    }
}

#[async_trait]
impl BookingRepository for SqliteStore {
    async fn find_by_domain(&self, domain_name: &str) -> CoreResult<Vec<BookingRecord>> {
        let rows = booking::Entity::find()
            .filter(booking::Column::DomainName.eq(domain_name))
            .order_by_asc(booking::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query bookings: {e}")))?;

        rows.into_iter().map(booking::Model::into_record).collect()
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<BookingRecord>> {
        let row = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query booking: {e}")))?;

        row.map(booking::Model::into_record).transpose()
    }

    async fn insert(&self, record: &BookingRecord) -> CoreResult<()> {
        let active_model = booking::ActiveModel {
            id: Set(record.id.clone()),
            domain_name: Set(record.domain_name.clone()),
            start_date: Set(format_date(record.start_date)),
            end_date: Set(format_date(record.end_date)),
            client: Set(record.client.clone()),
            operator: Set(record.operator.clone()),
            project_type: Set(record.project_type.clone()),
            activity_type: Set(record.activity_type.clone()),
            note: Set(record.note.clone()),
            slack_channel: Set(record.slack_channel.clone()),
        };

        booking::Entity::insert(active_model)
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to insert booking: {e}")))?;

        Ok(())
    }

    async fn update_end_date(&self, id: &str, end_date: NaiveDate) -> CoreResult<()> {
        let result = booking::Entity::update_many()
            .col_expr(booking::Column::EndDate, Expr::value(format_date(end_date)))
            .filter(booking::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to update booking: {e}")))?;

        if result.rows_affected == 0 {
            return Err(CoreError::BookingNotFound(id.to_string()));
        }
        Ok(())
    }
}
