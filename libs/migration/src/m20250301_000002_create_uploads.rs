use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Uploads::Table)
                    .if_not_exists()
                    .col(pk_uuid(Uploads::Id))
                    .col(string(Uploads::Name))
                    .col(double(Uploads::SizeMb))
                    .col(string(Uploads::FilePath))
                    .col(string_len(Uploads::ContentType, 127))
                    .col(string_len(Uploads::Extension, 32))
                    // Users live in the identity store; no FK
                    .col(uuid_null(Uploads::UploaderId))
                    .col(
                        timestamp_with_time_zone(Uploads::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Uploads::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(boolean(Uploads::IsDeleted).default(false))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Uploads::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Uploads {
    Table,
    Id,
    Name,
    SizeMb,
    FilePath,
    ContentType,
    Extension,
    UploaderId,
    CreatedAt,
    UpdatedAt,
    IsDeleted,
}
