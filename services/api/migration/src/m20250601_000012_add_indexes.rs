use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Sessions::Table)
                    .col(Sessions::UserId)
                    .name("idx_sessions_user_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Bookings::Table)
                    .col(Bookings::CustomerId)
                    .name("idx_airport_pickup_bookings_customer_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Payments::Table)
                    .col(Payments::BookingId)
                    .name("idx_airport_pickup_booking_payments_booking_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(AuditLogs::Table)
                    .col(AuditLogs::CreatedAt)
                    .name("idx_audit_logs_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_audit_logs_created_at").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_airport_pickup_booking_payments_booking_id")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_airport_pickup_bookings_customer_id")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_sessions_user_id").to_owned())
            .await
    }
}

#[derive(Iden)]
enum Sessions {
    Table,
    UserId,
}

#[derive(Iden)]
enum Bookings {
    #[iden = "airport_pickup_bookings"]
    Table,
    CustomerId,
}

#[derive(Iden)]
enum Payments {
    #[iden = "airport_pickup_booking_payments"]
    Table,
    BookingId,
}

#[derive(Iden)]
enum AuditLogs {
    Table,
    CreatedAt,
}
