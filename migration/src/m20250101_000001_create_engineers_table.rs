use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Engineers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Engineers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Engineers::Name).string().not_null())
                    .col(ColumnDef::new(Engineers::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Engineers::Role).string().not_null())
                    .col(ColumnDef::new(Engineers::Specialization).string().not_null())
                    .col(ColumnDef::new(Engineers::ContactNumber).string().not_null())
                    .col(ColumnDef::new(Engineers::Experience).integer().not_null())
                    .col(ColumnDef::new(Engineers::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Engineers::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Engineers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Engineers {
    Table,
    Id,
    Name,
    Email,
    Role,
    Specialization,
    ContactNumber,
    Experience,
    CreatedAt,
    UpdatedAt,
}
