use sea_orm::entity::prelude::*;

/// Airport pickup request. `status` holds a lifecycle state string; the
/// airport reference is delete-restricted, driver and vehicle are assigned
/// later and nullable.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "airport_pickup_bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub fare: f64,
    pub airport_id: Uuid,
    pub status: String,
    pub note: Option<String>,
    pub driver_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub customer_id: Uuid,
    pub drop_off_latitude: f64,
    pub drop_off_longitude: f64,
    pub drop_off_location_name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::airports::Entity",
        from = "Column::AirportId",
        to = "super::airports::Column::Id"
    )]
    Airport,
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::DriverId",
        to = "super::employees::Column::Id"
    )]
    Driver,
    #[sea_orm(
        belongs_to = "super::vehicles::Entity",
        from = "Column::VehicleId",
        to = "super::vehicles::Column::Id"
    )]
    Vehicle,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::airports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Airport.def()
    }
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::vehicles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
