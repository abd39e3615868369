use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::Fare).double().not_null())
                    .col(ColumnDef::new(Bookings::AirportId).uuid().not_null())
                    .col(ColumnDef::new(Bookings::Status).string().not_null())
                    .col(ColumnDef::new(Bookings::Note).text())
                    .col(ColumnDef::new(Bookings::DriverId).uuid())
                    .col(ColumnDef::new(Bookings::VehicleId).uuid())
                    .col(ColumnDef::new(Bookings::CustomerId).uuid().not_null())
                    .col(
                        ColumnDef::new(Bookings::DropOffLatitude)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::DropOffLongitude)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Bookings::DropOffLocationName).text())
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Bookings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Bookings::Table, Bookings::AirportId)
                            .to(Airports::Table, Airports::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Bookings::Table, Bookings::CustomerId)
                            .to(Customers::Table, Customers::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Bookings::Table, Bookings::DriverId)
                            .to(Employees::Table, Employees::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Bookings::Table, Bookings::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Bookings {
    #[iden = "airport_pickup_bookings"]
    Table,
    Id,
    Fare,
    AirportId,
    Status,
    Note,
    DriverId,
    VehicleId,
    CustomerId,
    DropOffLatitude,
    DropOffLongitude,
    DropOffLocationName,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Airports {
    Table,
    Id,
}

#[derive(Iden)]
enum Customers {
    Table,
    Id,
}

#[derive(Iden)]
enum Employees {
    Table,
    Id,
}

#[derive(Iden)]
enum Vehicles {
    Table,
    Id,
}
