use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RideOptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RideOptions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RideOptions::Name).string().not_null())
                    .col(
                        ColumnDef::new(RideOptions::PricePerMileUgx)
                            .double()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(RideOptions::PricePerMileUsd)
                            .double()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(RideOptions::PhotoUrl).string().not_null())
                    .col(
                        ColumnDef::new(RideOptions::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(RideOptions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(RideOptions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RideOptions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RideOptions {
    #[iden = "airport_pickup_ride_options"]
    Table,
    Id,
    Name,
    PricePerMileUgx,
    PricePerMileUsd,
    PhotoUrl,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
