//! Deterministic fixture values.
//!
//! Mock repositories and assertions need stable ids and timestamps; these
//! helpers keep them readable at the call site (`uuid_n(1)`, `future()`).

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// A stable UUID derived from `n`. `uuid_n(1)` is always the same value.
pub fn uuid_n(n: u8) -> Uuid {
    Uuid::from_bytes([n; 16])
}

/// A timestamp comfortably in the past (one hour ago).
pub fn past() -> DateTime<Utc> {
    Utc::now() - Duration::hours(1)
}

/// A timestamp comfortably in the future (90 days out, the session horizon).
pub fn future() -> DateTime<Utc> {
    Utc::now() + Duration::days(90)
}
