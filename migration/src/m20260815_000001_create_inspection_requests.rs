use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::Expr;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Single source of truth for the inspection request schema; applied
        // once at startup, never from a request path.
        manager
            .create_table(
                Table::create()
                    .table(InspectionRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InspectionRequests::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(InspectionRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(InspectionRequests::Name).text().not_null())
                    .col(ColumnDef::new(InspectionRequests::Phone).text().not_null())
                    .col(
                        ColumnDef::new(InspectionRequests::Address)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(InspectionRequests::Occupancy).text())
                    .col(ColumnDef::new(InspectionRequests::EscrowDate).date())
                    .col(ColumnDef::new(InspectionRequests::Lockbox).text())
                    .col(ColumnDef::new(InspectionRequests::MeetingSomeone).text())
                    .col(
                        ColumnDef::new(InspectionRequests::TextConsent)
                            .text()
                            .not_null()
                            .default("No"),
                    )
                    .col(
                        ColumnDef::new(InspectionRequests::Status)
                            .text()
                            .not_null()
                            .default("New"),
                    )
                    .col(ColumnDef::new(InspectionRequests::AdminNotes).text())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InspectionRequests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum InspectionRequests {
    Table,
    Id,
    CreatedAt,
    Name,
    Phone,
    Address,
    Occupancy,
    EscrowDate,
    Lockbox,
    MeetingSomeone,
    TextConsent,
    Status,
    AdminNotes,
}
