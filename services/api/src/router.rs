use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    routing::{delete, get, patch, post, put},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use skylift_core::health::healthz;
use skylift_core::request_id::{propagate_request_id_layer, set_request_id_layer};

use crate::handlers::{
    airports::{create_airport, list_airports, list_public_airports},
    audit_logs::list_audit_logs,
    auth::{
        customer_login, customer_profile, customer_signup, delete_session, employee_login,
        employee_profile, list_sessions, logout,
    },
    bookings::{create_booking, list_bookings, transition_booking},
    employees::{create_employee, get_employee, list_employees},
    payments::payment_callback,
    ride_options::{create_ride_option, list_ride_options},
    roles::{create_role, delete_role, get_role, list_roles, update_role},
    vehicles::{create_vehicle, list_vehicles},
};
use crate::state::AppState;

/// Photo uploads arrive as multipart bodies well past axum's 2 MB default.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/employees/login", post(employee_login))
        .route("/auth/employees", get(employee_profile))
        .route("/auth/customers/signup", post(customer_signup))
        .route("/auth/customers/login", post(customer_login))
        .route("/auth/customers", get(customer_profile))
        .route("/auth/sessions", get(list_sessions))
        .route("/auth/sessions/{session_id}", delete(delete_session))
        .route("/auth/logout", delete(logout))
        // Employees. `/employees/roles` is static, so it never collides
        // with `/employees/{id}`.
        .route("/employees", get(list_employees))
        .route("/employees", post(create_employee))
        .route("/employees/roles", get(list_roles))
        .route("/employees/roles", post(create_role))
        .route("/employees/roles/{slug}", get(get_role))
        .route("/employees/roles/{slug}", put(update_role))
        .route("/employees/roles/{slug}", delete(delete_role))
        .route("/employees/{id}", get(get_employee))
        // Airport pickups
        .route("/airport-pickups/airports", get(list_airports))
        .route("/airport-pickups/airports", post(create_airport))
        .route("/airport-pickups/airports/public", get(list_public_airports))
        .route("/airport-pickups/ride-options", get(list_ride_options))
        .route("/airport-pickups/ride-options", post(create_ride_option))
        .route("/airport-pickups/bookings", post(create_booking))
        .route("/airport-pickups/bookings", get(list_bookings))
        .route(
            "/airport-pickups/bookings/{id}/status",
            patch(transition_booking),
        )
        // Vehicles
        .route("/vehicles", get(list_vehicles))
        .route("/vehicles", post(create_vehicle))
        // Payments
        .route("/payments/{payment_id}/callback", get(payment_callback))
        // Audit
        .route("/audit-logs", get(list_audit_logs))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}

/// `GET /readyz` — ready once the database answers a ping.
async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
