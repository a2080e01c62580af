use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Projects::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Projects::Name).string().not_null())
                    .col(ColumnDef::new(Projects::Description).text().not_null())
                    .col(ColumnDef::new(Projects::Location).string().not_null())
                    .col(ColumnDef::new(Projects::Client).string().not_null())
                    .col(ColumnDef::new(Projects::Budget).double().not_null())
                    .col(ColumnDef::new(Projects::StartDate).date().not_null())
                    .col(ColumnDef::new(Projects::ExpectedEndDate).date().not_null())
                    .col(ColumnDef::new(Projects::CurrentPhase).string().not_null())
                    .col(ColumnDef::new(Projects::OverallProgress).integer().not_null())
                    .col(ColumnDef::new(Projects::Status).string().not_null())
                    // Phases and their assignments live inside the project document.
                    .col(ColumnDef::new(Projects::Phases).json().not_null())
                    .col(ColumnDef::new(Projects::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Projects::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_created_at")
                    .table(Projects::Table)
                    .col(Projects::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    Name,
    Description,
    Location,
    Client,
    Budget,
    StartDate,
    ExpectedEndDate,
    CurrentPhase,
    OverallProgress,
    Status,
    Phases,
    CreatedAt,
    UpdatedAt,
}
