//! Create comment table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Comment::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Comment::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Comment::ReportId).string_len(32).not_null())
                    .col(ColumnDef::new(Comment::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Comment::Text).text().not_null())
                    .col(
                        ColumnDef::new(Comment::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Composite index: (report_id, id) for comment listing
        manager
            .create_index(
                Index::create()
                    .name("idx_comment_report_id_id")
                    .table(Comment::Table)
                    .col(Comment::ReportId)
                    .col(Comment::Id)
                    .to_owned(),
            )
            .await?;

        // Foreign key: report_id -> report.id
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_comment_report_id")
                    .from(Comment::Table, Comment::ReportId)
                    .to(Report::Table, Report::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        // Foreign key: user_id -> user.id
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_comment_user_id")
                    .from(Comment::Table, Comment::UserId)
                    .to(User::Table, User::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comment::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Comment {
    Table,
    Id,
    ReportId,
    UserId,
    Text,
    CreatedAt,
}

#[derive(Iden)]
enum Report {
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
