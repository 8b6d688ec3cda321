//! `SeaORM` entity for the `domains` table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "domains")]
/// Database row model for a tracked domain.
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    pub registrar: Option<String>,
    /// ISO `YYYY-MM-DD`
    pub creation: String,
    /// ISO `YYYY-MM-DD`
    pub expiration: String,
    pub dns_record: Option<String>,
    pub talos: Option<String>,
    pub opendns: Option<String>,
    pub bluecoat: Option<String>,
    pub xforce: Option<String>,
    pub trendmicro: Option<String>,
    pub fortiguard: Option<String>,
    pub all_categories: Option<String>,
    pub health_status: String,
    pub health_dns: Option<String>,
    pub mail_status: Option<String>,
    pub burned_explanation: Option<String>,
    pub domain_status: String,
    pub whois_status: String,
    pub last_used_by: Option<String>,
    pub note: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
