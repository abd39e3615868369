use skylift_domain::permission::Permission;

use crate::domain::repository::AirportRepository;
use crate::domain::types::{Airport, AuthUser, NewAirport};
use crate::error::{ApiError, FieldError};
use crate::usecase::require_permission;

// ── ListAirports ─────────────────────────────────────────────────────────────

pub struct ListAirportsUseCase<A: AirportRepository> {
    pub airports: A,
}

impl<A: AirportRepository> ListAirportsUseCase<A> {
    /// Dashboard listing, inactive airports included.
    pub async fn execute(&self, actor: &AuthUser) -> Result<Vec<Airport>, ApiError> {
        if actor.employee.is_none() {
            return Err(ApiError::Unauthorized);
        }
        self.airports.list_all().await
    }
}

// ── ListPublicAirports ───────────────────────────────────────────────────────

pub struct ListPublicAirportsUseCase<A: AirportRepository> {
    pub airports: A,
}

impl<A: AirportRepository> ListPublicAirportsUseCase<A> {
    /// Unauthenticated listing for the booking flow; active airports only.
    pub async fn execute(&self) -> Result<Vec<Airport>, ApiError> {
        self.airports.list_active().await
    }
}

// ── CreateAirport ────────────────────────────────────────────────────────────

pub struct CreateAirportInput {
    pub name: String,
    pub code: String,
    pub latitude: f64,
    pub longitude: f64,
}

pub struct CreateAirportUseCase<A: AirportRepository> {
    pub airports: A,
}

impl<A: AirportRepository> CreateAirportUseCase<A> {
    pub async fn execute(
        &self,
        actor: &AuthUser,
        input: CreateAirportInput,
    ) -> Result<Airport, ApiError> {
        require_permission(actor, Permission::CreateAirport)?;

        let airport = validate(&input)?;
        self.airports.create(&airport).await
    }
}

fn validate(input: &CreateAirportInput) -> Result<NewAirport, ApiError> {
    let mut errors = Vec::new();
    let name = input.name.trim();
    if name.is_empty() {
        errors.push(FieldError::new("name", "Name is required."));
    }
    // IATA-style codes are stored uppercase.
    let code = input.code.trim().to_uppercase();
    if code.is_empty() {
        errors.push(FieldError::new("code", "Code is required."));
    }
    if !(-90.0..=90.0).contains(&input.latitude) {
        errors.push(FieldError::new("latitude", "Latitude must be within -90 and 90"));
    }
    if !(-180.0..=180.0).contains(&input.longitude) {
        errors.push(FieldError::new(
            "longitude",
            "Longitude must be within -180 and 180",
        ));
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    Ok(NewAirport {
        name: name.to_owned(),
        code,
        latitude: input.latitude,
        longitude: input.longitude,
    })
}
