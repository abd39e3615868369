//! sea-orm entities for the Skylift API service.
//!
//! Enumerated columns (booking status, employee type, payment status/method,
//! permissions) are stored in their string form; conversion to domain enums
//! happens at the repository boundary.

pub mod airports;
pub mod audit_logs;
pub mod bookings;
pub mod customers;
pub mod employee_roles;
pub mod employees;
pub mod payments;
pub mod ride_options;
pub mod sessions;
pub mod users;
pub mod vehicles;
