mod helpers;

mod audit_test;
mod booking_test;
mod employee_test;
mod payment_test;
mod role_test;
mod session_test;
