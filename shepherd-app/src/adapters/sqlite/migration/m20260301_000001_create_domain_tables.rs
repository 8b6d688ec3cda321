use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Domain::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Domain::Name)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Domain::Registrar).string().null())
                    .col(ColumnDef::new(Domain::Creation).string().not_null())
                    .col(ColumnDef::new(Domain::Expiration).string().not_null())
                    .col(ColumnDef::new(Domain::DnsRecord).string().null())
                    .col(ColumnDef::new(Domain::Talos).string().null())
                    .col(ColumnDef::new(Domain::Opendns).string().null())
                    .col(ColumnDef::new(Domain::Bluecoat).string().null())
                    .col(ColumnDef::new(Domain::Xforce).string().null())
                    .col(ColumnDef::new(Domain::Trendmicro).string().null())
                    .col(ColumnDef::new(Domain::Fortiguard).string().null())
                    .col(ColumnDef::new(Domain::AllCategories).string().null())
                    .col(
                        ColumnDef::new(Domain::HealthStatus)
                            .string()
                            .not_null()
                            .default("Healthy"),
                    )
                    .col(ColumnDef::new(Domain::HealthDns).string().null())
                    .col(ColumnDef::new(Domain::MailStatus).string().null())
                    .col(ColumnDef::new(Domain::BurnedExplanation).string().null())
                    .col(
                        ColumnDef::new(Domain::DomainStatus)
                            .string()
                            .not_null()
                            .default("Available"),
                    )
                    .col(
                        ColumnDef::new(Domain::WhoisStatus)
                            .string()
                            .not_null()
                            .default("Enabled"),
                    )
                    .col(ColumnDef::new(Domain::LastUsedBy).string().null())
                    .col(ColumnDef::new(Domain::Note).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Booking::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Booking::DomainName).string().not_null())
                    .col(ColumnDef::new(Booking::StartDate).string().not_null())
                    .col(ColumnDef::new(Booking::EndDate).string().not_null())
                    .col(ColumnDef::new(Booking::Client).string().not_null())
                    .col(ColumnDef::new(Booking::Operator).string().null())
                    .col(ColumnDef::new(Booking::ProjectType).string().not_null())
                    .col(ColumnDef::new(Booking::ActivityType).string().not_null())
                    .col(ColumnDef::new(Booking::Note).string().null())
                    .col(ColumnDef::new(Booking::SlackChannel).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_domain")
                            .from(Booking::Table, Booking::DomainName)
                            .to(Domain::Table, Domain::Name)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_domain_name")
                    .table(Booking::Table)
                    .col(Booking::DomainName)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Domain::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Domain {
    #[sea_orm(iden = "domains")]
    Table,
    Name,
    Registrar,
    Creation,
    Expiration,
    DnsRecord,
    Talos,
    Opendns,
    Bluecoat,
    Xforce,
    Trendmicro,
    Fortiguard,
    AllCategories,
    HealthStatus,
    HealthDns,
    MailStatus,
    BurnedExplanation,
    DomainStatus,
    WhoisStatus,
    LastUsedBy,
    Note,
}

#[derive(DeriveIden)]
enum Booking {
    #[sea_orm(iden = "bookings")]
    Table,
    Id,
    DomainName,
    StartDate,
    EndDate,
    Client,
    Operator,
    ProjectType,
    ActivityType,
    Note,
    SlackChannel,
}
