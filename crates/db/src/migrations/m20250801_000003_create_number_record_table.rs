//! Create number record table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NumberRecord::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NumberRecord::Number)
                            .string_len(16)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(NumberRecord::ReportsCount).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(NumberRecord::FirstReportedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(NumberRecord::LastReportedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(NumberRecord::ReportIds).json_binary().not_null().default("[]"))
                    .col(ColumnDef::new(NumberRecord::Flagged).boolean().not_null().default(true))
                    .col(ColumnDef::new(NumberRecord::Verified).boolean().not_null().default(true))
                    .to_owned(),
            )
            .await?;

        // Index: reports_count (for top-numbers ranking)
        manager
            .create_index(
                Index::create()
                    .name("idx_number_record_reports_count")
                    .table(NumberRecord::Table)
                    .col(NumberRecord::ReportsCount)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NumberRecord::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum NumberRecord {
    Table,
    Number,
    ReportsCount,
    FirstReportedAt,
    LastReportedAt,
    ReportIds,
    Flagged,
    Verified,
}
