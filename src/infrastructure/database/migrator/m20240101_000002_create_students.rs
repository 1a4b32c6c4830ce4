//! Create students table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Students::Nim)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::Name).string().not_null())
                    .col(ColumnDef::new(Students::Email).string().not_null())
                    .col(ColumnDef::new(Students::Phone).string())
                    .col(ColumnDef::new(Students::Address).string())
                    .col(ColumnDef::new(Students::DateOfBirth).timestamp_with_time_zone())
                    .col(ColumnDef::new(Students::Year).string())
                    .col(ColumnDef::new(Students::Major).string().not_null())
                    .col(
                        ColumnDef::new(Students::EnrollmentDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Students::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Students::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_students_name")
                    .table(Students::Table)
                    .col(Students::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Students {
    Table,
    Id,
    Nim,
    Name,
    Email,
    Phone,
    Address,
    DateOfBirth,
    Year,
    Major,
    EnrollmentDate,
    CreatedAt,
    UpdatedAt,
}
