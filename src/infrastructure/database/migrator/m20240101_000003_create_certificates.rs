//! Create certificates table
//!
//! Certificates reference students with a RESTRICT foreign key, so a
//! student who still owns certificates cannot be removed at the schema level.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_students::Students;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Certificates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Certificates::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Certificates::Title).string().not_null())
                    .col(ColumnDef::new(Certificates::Description).text())
                    .col(ColumnDef::new(Certificates::StudentId).string().not_null())
                    .col(
                        ColumnDef::new(Certificates::IssueDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Certificates::ExpiryDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Certificates::FileUrl).string())
                    .col(
                        ColumnDef::new(Certificates::Status)
                            .string_len(16)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(Certificates::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Certificates::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_certificates_student")
                            .from(Certificates::Table, Certificates::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_certificates_student")
                    .table(Certificates::Table)
                    .col(Certificates::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_certificates_status")
                    .table(Certificates::Table)
                    .col(Certificates::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_certificates_created_at")
                    .table(Certificates::Table)
                    .col(Certificates::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Certificates::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Certificates {
    Table,
    Id,
    Title,
    Description,
    StudentId,
    IssueDate,
    ExpiryDate,
    FileUrl,
    Status,
    CreatedAt,
    UpdatedAt,
}
