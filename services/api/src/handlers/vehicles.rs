use axum::{
    Json,
    extract::{Multipart, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use skylift_domain::pagination::PageRequest;
use uuid::Uuid;

use crate::domain::types::Vehicle;
use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::handlers::bad_multipart;
use crate::response::{self, Envelope, Paginated};
use crate::state::AppState;
use crate::usecase::vehicle::{CreateVehicleInput, CreateVehicleUseCase, ListVehiclesUseCase};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub plate_number: String,
    pub seats: i32,
    pub color: Option<String>,
    pub photo_url: String,
    pub is_active: bool,
    #[serde(serialize_with = "skylift_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "skylift_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleDto {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            name: vehicle.name,
            slug: vehicle.slug,
            plate_number: vehicle.plate_number,
            seats: vehicle.seats,
            color: vehicle.color,
            photo_url: vehicle.photo_url,
            is_active: vehicle.is_active,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}

// ── GET /vehicles ────────────────────────────────────────────────────────────

pub async fn list_vehicles(
    CurrentUser(auth): CurrentUser,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Envelope<Paginated<VehicleDto>>>, ApiError> {
    let usecase = ListVehiclesUseCase {
        vehicles: state.vehicle_repo(),
    };
    let (vehicles, pagination) = usecase.execute(&auth.user, page).await?;
    Ok(response::success(
        "Success",
        Paginated {
            items: vehicles.into_iter().map(VehicleDto::from).collect(),
            pagination,
        },
    ))
}

// ── POST /vehicles ───────────────────────────────────────────────────────────

pub async fn create_vehicle(
    CurrentUser(auth): CurrentUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Envelope<VehicleDto>>), ApiError> {
    let mut name = String::new();
    let mut plate_number = String::new();
    let mut seats: i64 = 0;
    let mut color = None;
    let mut photo = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let part = field.name().unwrap_or_default().to_owned();
        match part.as_str() {
            "photo" => photo = field.bytes().await.map_err(bad_multipart)?.to_vec(),
            "name" => name = field.text().await.map_err(bad_multipart)?,
            "plateNumber" => plate_number = field.text().await.map_err(bad_multipart)?,
            "seats" => {
                let raw = field.text().await.map_err(bad_multipart)?;
                seats = raw
                    .parse()
                    .map_err(|_| ApiError::invalid("seats", "Must be a number"))?;
            }
            "color" => color = Some(field.text().await.map_err(bad_multipart)?),
            _ => {}
        }
    }

    let usecase = CreateVehicleUseCase {
        vehicles: state.vehicle_repo(),
        storage: state.storage.clone(),
    };
    let vehicle = usecase
        .execute(
            &auth.user,
            CreateVehicleInput {
                name,
                plate_number,
                seats,
                color,
                photo,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        response::success("Vehicle created successfully", vehicle.into()),
    ))
}
