use sea_orm_migration::prelude::*;

mod m20250601_000001_create_users;
mod m20250601_000002_create_employee_roles;
mod m20250601_000003_create_employees;
mod m20250601_000004_create_customers;
mod m20250601_000005_create_sessions;
mod m20250601_000006_create_airports;
mod m20250601_000007_create_vehicles;
mod m20250601_000008_create_ride_options;
mod m20250601_000009_create_bookings;
mod m20250601_000010_create_payments;
mod m20250601_000011_create_audit_logs;
mod m20250601_000012_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_users::Migration),
            Box::new(m20250601_000002_create_employee_roles::Migration),
            Box::new(m20250601_000003_create_employees::Migration),
            Box::new(m20250601_000004_create_customers::Migration),
            Box::new(m20250601_000005_create_sessions::Migration),
            Box::new(m20250601_000006_create_airports::Migration),
            Box::new(m20250601_000007_create_vehicles::Migration),
            Box::new(m20250601_000008_create_ride_options::Migration),
            Box::new(m20250601_000009_create_bookings::Migration),
            Box::new(m20250601_000010_create_payments::Migration),
            Box::new(m20250601_000011_create_audit_logs::Migration),
            Box::new(m20250601_000012_add_indexes::Migration),
        ]
    }
}
