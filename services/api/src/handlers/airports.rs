use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::Airport;
use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::response::{self, Envelope};
use crate::state::AppState;
use crate::usecase::airport::{
    CreateAirportInput, CreateAirportUseCase, ListAirportsUseCase, ListPublicAirportsUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportDto {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub is_active: bool,
    #[serde(serialize_with = "skylift_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "skylift_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Airport> for AirportDto {
    fn from(airport: Airport) -> Self {
        Self {
            id: airport.id,
            name: airport.name,
            code: airport.code,
            latitude: airport.latitude,
            longitude: airport.longitude,
            is_active: airport.is_active,
            created_at: airport.created_at,
            updated_at: airport.updated_at,
        }
    }
}

// ── GET /airport-pickups/airports ────────────────────────────────────────────

pub async fn list_airports(
    CurrentUser(auth): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<AirportDto>>>, ApiError> {
    let usecase = ListAirportsUseCase {
        airports: state.airport_repo(),
    };
    let airports = usecase.execute(&auth.user).await?;
    Ok(response::success(
        "Success",
        airports.into_iter().map(AirportDto::from).collect(),
    ))
}

// ── GET /airport-pickups/airports/public ─────────────────────────────────────

pub async fn list_public_airports(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<AirportDto>>>, ApiError> {
    let usecase = ListPublicAirportsUseCase {
        airports: state.airport_repo(),
    };
    let airports = usecase.execute().await?;
    Ok(response::success(
        "Success",
        airports.into_iter().map(AirportDto::from).collect(),
    ))
}

// ── POST /airport-pickups/airports ───────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAirportRequest {
    pub name: String,
    pub code: String,
    pub latitude: f64,
    pub longitude: f64,
}

pub async fn create_airport(
    CurrentUser(auth): CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<CreateAirportRequest>,
) -> Result<(StatusCode, Json<Envelope<AirportDto>>), ApiError> {
    let usecase = CreateAirportUseCase {
        airports: state.airport_repo(),
    };
    let airport = usecase
        .execute(
            &auth.user,
            CreateAirportInput {
                name: body.name,
                code: body.code,
                latitude: body.latitude,
                longitude: body.longitude,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        response::success("Airport created successfully", airport.into()),
    ))
}
