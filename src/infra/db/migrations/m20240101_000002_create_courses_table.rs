//! Migration: Create the courses table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Title).string().not_null())
                    .col(ColumnDef::new(Courses::Description).text().not_null())
                    .col(ColumnDef::new(Courses::Photos).string().null())
                    .col(ColumnDef::new(Courses::Mentor).string().not_null())
                    .col(ColumnDef::new(Courses::Rolementor).string().not_null())
                    .col(ColumnDef::new(Courses::Avatar).string().null())
                    .col(ColumnDef::new(Courses::Company).string().not_null())
                    .col(
                        ColumnDef::new(Courses::Rating)
                            .float()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Courses::ReviewCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Courses::Price).string().not_null())
                    .col(ColumnDef::new(Courses::Category).string().not_null())
                    .col(
                        ColumnDef::new(Courses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Courses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Category filtering and newest-first listings are the hot paths
        manager
            .create_index(
                Index::create()
                    .name("idx_courses_category")
                    .table(Courses::Table)
                    .col(Courses::Category)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_courses_created_at")
                    .table(Courses::Table)
                    .col(Courses::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_courses_created_at")
                    .table(Courses::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_courses_category")
                    .table(Courses::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Title,
    Description,
    Photos,
    Mentor,
    Rolementor,
    Avatar,
    Company,
    Rating,
    ReviewCount,
    Price,
    Category,
    CreatedAt,
    UpdatedAt,
}
