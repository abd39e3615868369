use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::types::RideOption;
use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::handlers::bad_multipart;
use crate::response::{self, Envelope};
use crate::state::AppState;
use crate::usecase::ride_option::{
    CreateRideOptionInput, CreateRideOptionUseCase, ListRideOptionsUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RideOptionDto {
    pub id: Uuid,
    pub name: String,
    pub price_per_mile_ugx: f64,
    pub price_per_mile_usd: f64,
    pub photo_url: String,
    pub is_active: bool,
    #[serde(serialize_with = "skylift_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "skylift_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<RideOption> for RideOptionDto {
    fn from(option: RideOption) -> Self {
        Self {
            id: option.id,
            name: option.name,
            price_per_mile_ugx: option.price_per_mile_ugx,
            price_per_mile_usd: option.price_per_mile_usd,
            photo_url: option.photo_url,
            is_active: option.is_active,
            created_at: option.created_at,
            updated_at: option.updated_at,
        }
    }
}

// ── GET /airport-pickups/ride-options ────────────────────────────────────────

pub async fn list_ride_options(
    CurrentUser(_auth): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<RideOptionDto>>>, ApiError> {
    let usecase = ListRideOptionsUseCase {
        ride_options: state.ride_option_repo(),
    };
    let options = usecase.execute().await?;
    Ok(response::success(
        "Success",
        options.into_iter().map(RideOptionDto::from).collect(),
    ))
}

// ── POST /airport-pickups/ride-options ───────────────────────────────────────

pub async fn create_ride_option(
    CurrentUser(auth): CurrentUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Envelope<RideOptionDto>>), ApiError> {
    let mut name = String::new();
    let mut price_per_mile_ugx = 0.0;
    let mut price_per_mile_usd = 0.0;
    let mut photo = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let part = field.name().unwrap_or_default().to_owned();
        match part.as_str() {
            "photo" => photo = field.bytes().await.map_err(bad_multipart)?.to_vec(),
            "name" => name = field.text().await.map_err(bad_multipart)?,
            "pricePerMileUgx" => {
                let raw = field.text().await.map_err(bad_multipart)?;
                price_per_mile_ugx = raw
                    .parse()
                    .map_err(|_| ApiError::invalid("pricePerMileUgx", "Must be a number"))?;
            }
            "pricePerMileUsd" => {
                let raw = field.text().await.map_err(bad_multipart)?;
                price_per_mile_usd = raw
                    .parse()
                    .map_err(|_| ApiError::invalid("pricePerMileUsd", "Must be a number"))?;
            }
            _ => {}
        }
    }

    let usecase = CreateRideOptionUseCase {
        ride_options: state.ride_option_repo(),
        storage: state.storage.clone(),
    };
    let option = usecase
        .execute(
            &auth.user,
            CreateRideOptionInput {
                name,
                price_per_mile_ugx,
                price_per_mile_usd,
                photo,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        response::success("Ride option created successfully", option.into()),
    ))
}
