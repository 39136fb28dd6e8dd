use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Addresses::Table)
                    .if_not_exists()
                    .col(pk_uuid(Addresses::Id))
                    .col(uuid(Addresses::UserId))
                    .col(string_len(Addresses::Street, 500))
                    .col(string_len(Addresses::City, 100))
                    .col(string_len_null(Addresses::PostalCode, 20))
                    .col(string_len_null(Addresses::Country, 100))
                    .col(string_len_null(Addresses::Apartment, 50))
                    .col(string_len_null(Addresses::PhoneNumber, 30))
                    .col(boolean(Addresses::IsDefault).default(false))
                    .col(
                        timestamp_with_time_zone(Addresses::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Addresses::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(boolean(Addresses::IsDeleted).default(false))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_addresses_user_id")
                    .table(Addresses::Table)
                    .col(Addresses::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Addresses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Addresses {
    Table,
    Id,
    UserId,
    Street,
    City,
    PostalCode,
    Country,
    Apartment,
    PhoneNumber,
    IsDefault,
    CreatedAt,
    UpdatedAt,
    IsDeleted,
}
