//! Create report table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Report::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Report::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Report::Number).string_len(16).not_null())
                    .col(ColumnDef::new(Report::Carrier).string_len(64).not_null())
                    .col(ColumnDef::new(Report::FraudType).string_len(64).not_null())
                    .col(ColumnDef::new(Report::Category).string_len(64).not_null())
                    .col(ColumnDef::new(Report::Description).text().not_null())
                    .col(ColumnDef::new(Report::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Report::Status).string_len(16).not_null().default("active"))
                    .col(ColumnDef::new(Report::Verified).boolean().not_null().default(true))
                    .col(ColumnDef::new(Report::Upvotes).integer().not_null().default(0))
                    .col(ColumnDef::new(Report::Downvotes).integer().not_null().default(0))
                    .col(ColumnDef::new(Report::CommentsCount).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Report::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Report::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Composite index: (number, created_at) for number lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_report_number_created_at")
                    .table(Report::Table)
                    .col(Report::Number)
                    .col(Report::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Composite index: (user_id, id) for "my reports"
        manager
            .create_index(
                Index::create()
                    .name("idx_report_user_id_id")
                    .table(Report::Table)
                    .col(Report::UserId)
                    .col(Report::Id)
                    .to_owned(),
            )
            .await?;

        // Index: status (for dashboard counts)
        manager
            .create_index(
                Index::create()
                    .name("idx_report_status")
                    .table(Report::Table)
                    .col(Report::Status)
                    .to_owned(),
            )
            .await?;

        // Foreign key: user_id -> user.id
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_report_user_id")
                    .from(Report::Table, Report::UserId)
                    .to(User::Table, User::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Report::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Report {
    Table,
    Id,
    Number,
    Carrier,
    FraudType,
    Category,
    Description,
    UserId,
    Status,
    Verified,
    Upvotes,
    Downvotes,
    CommentsCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
