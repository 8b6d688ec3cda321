//! `SeaORM` entity for the `bookings` table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub domain_name: String,
    pub start_date: String,
    pub end_date: String,
    pub client: String,
    pub operator: Option<String>,
    pub project_type: String,
    pub activity_type: String,
    pub note: Option<String>,
    pub slack_channel: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
