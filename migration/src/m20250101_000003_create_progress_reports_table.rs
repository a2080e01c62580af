use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No foreign keys: reports reference projects, phases and engineers by id only.
        manager
            .create_table(
                Table::create()
                    .table(ProgressReports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProgressReports::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProgressReports::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(ProgressReports::PhaseId).uuid().not_null())
                    .col(ColumnDef::new(ProgressReports::ReportedBy).uuid().not_null())
                    .col(ColumnDef::new(ProgressReports::ReportDate).timestamp().not_null())
                    .col(ColumnDef::new(ProgressReports::ProgressPercentage).integer().not_null())
                    .col(ColumnDef::new(ProgressReports::Description).text().not_null())
                    .col(ColumnDef::new(ProgressReports::NextSteps).text())
                    .col(ColumnDef::new(ProgressReports::Issues).json().not_null())
                    .col(ColumnDef::new(ProgressReports::Attachments).json().not_null())
                    .col(ColumnDef::new(ProgressReports::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(ProgressReports::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_progress_reports_project_id")
                    .table(ProgressReports::Table)
                    .col(ProgressReports::ProjectId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProgressReports::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProgressReports {
    Table,
    Id,
    ProjectId,
    PhaseId,
    ReportedBy,
    ReportDate,
    ProgressPercentage,
    Description,
    NextSteps,
    Issues,
    Attachments,
    CreatedAt,
    UpdatedAt,
}
