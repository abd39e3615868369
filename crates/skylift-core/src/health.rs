use axum::http::StatusCode;

/// Handler for `GET /healthz` — liveness check.
///
/// Readiness (`/readyz`) is wired per service because it probes the
/// service's own backing stores.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
