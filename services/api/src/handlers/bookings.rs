use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skylift_domain::booking::BookingStatus;
use skylift_domain::currency::Currency;
use uuid::Uuid;

use crate::domain::types::Booking;
use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::response::{self, Envelope};
use crate::state::AppState;
use crate::usecase::booking::{
    CreateBookingInput, CreateBookingUseCase, ListBookingsUseCase, TransitionBookingUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: Uuid,
    pub fare: f64,
    pub airport_id: Uuid,
    pub status: BookingStatus,
    pub note: Option<String>,
    pub drop_off_latitude: f64,
    pub drop_off_longitude: f64,
    pub drop_off_location_name: Option<String>,
    pub customer_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    #[serde(serialize_with = "skylift_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "skylift_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingDto {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            fare: booking.fare,
            airport_id: booking.airport_id,
            status: booking.status,
            note: booking.note,
            drop_off_latitude: booking.drop_off_latitude,
            drop_off_longitude: booking.drop_off_longitude,
            drop_off_location_name: booking.drop_off_location_name,
            customer_id: booking.customer_id,
            driver_id: booking.driver_id,
            vehicle_id: booking.vehicle_id,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

// ── POST /airport-pickups/bookings ───────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub airport_id: Uuid,
    pub ride_option_id: Uuid,
    pub fare: f64,
    pub currency: Currency,
    pub drop_off_latitude: f64,
    pub drop_off_longitude: f64,
    pub drop_off_name: String,
    pub note: Option<String>,
}

/// `paymentToken` is null (and `paymentTokenError` set) when the gateway
/// call failed; the booking itself is already committed either way.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreatedPayload {
    pub booking: BookingDto,
    pub payment_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_token_error: Option<&'static str>,
}

pub async fn create_booking(
    CurrentUser(auth): CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Envelope<BookingCreatedPayload>>), ApiError> {
    let usecase = CreateBookingUseCase {
        bookings: state.booking_repo(),
        gateway: state.gateway.clone(),
        audit: state.audit_repo(),
        redirect_base_url: state.payment_redirect_base_url.clone(),
    };
    let output = usecase
        .execute(
            &auth.user,
            CreateBookingInput {
                airport_id: body.airport_id,
                ride_option_id: body.ride_option_id,
                fare: body.fare,
                currency: body.currency,
                drop_off_latitude: body.drop_off_latitude,
                drop_off_longitude: body.drop_off_longitude,
                drop_off_name: body.drop_off_name,
                note: body.note,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        response::success(
            "Booking created",
            BookingCreatedPayload {
                booking: output.booking.into(),
                payment_token: output.payment_token,
                payment_token_error: output.payment_token_error,
            },
        ),
    ))
}

// ── GET /airport-pickups/bookings ────────────────────────────────────────────

pub async fn list_bookings(
    CurrentUser(auth): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<BookingDto>>>, ApiError> {
    let usecase = ListBookingsUseCase {
        bookings: state.booking_repo(),
    };
    let bookings = usecase.execute(&auth.user).await?;
    Ok(response::success(
        "Success",
        bookings.into_iter().map(BookingDto::from).collect(),
    ))
}

// ── PATCH /airport-pickups/bookings/{id}/status ──────────────────────────────

#[derive(Deserialize)]
pub struct TransitionRequest {
    pub status: BookingStatus,
}

pub async fn transition_booking(
    CurrentUser(auth): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<TransitionRequest>,
) -> Result<Json<Envelope<BookingDto>>, ApiError> {
    let usecase = TransitionBookingUseCase {
        bookings: state.booking_repo(),
        audit: state.audit_repo(),
    };
    let booking = usecase.execute(&auth.user, id, body.status).await?;
    Ok(response::success(
        "Booking updated successfully",
        booking.into(),
    ))
}
