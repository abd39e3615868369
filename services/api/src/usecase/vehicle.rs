use skylift_domain::pagination::{PageInfo, PageRequest};
use skylift_domain::permission::Permission;

use crate::domain::repository::{ObjectStorage, VehicleRepository};
use crate::domain::types::{AuthUser, NewVehicle, Vehicle};
use crate::error::{ApiError, FieldError};
use crate::usecase::require_permission;

/// Bucket folder for vehicle photos.
const PHOTO_FOLDER: &str = "vehicle-photos";

// ── ListVehicles ─────────────────────────────────────────────────────────────

pub struct ListVehiclesUseCase<V: VehicleRepository> {
    pub vehicles: V,
}

impl<V: VehicleRepository> ListVehiclesUseCase<V> {
    pub async fn execute(
        &self,
        actor: &AuthUser,
        page: PageRequest,
    ) -> Result<(Vec<Vehicle>, PageInfo), ApiError> {
        require_permission(actor, Permission::ViewVehicle)?;
        let page = page.validated()?;
        let (vehicles, total) = self.vehicles.list(page).await?;
        Ok((vehicles, PageInfo::new(total, page)))
    }
}

// ── CreateVehicle ────────────────────────────────────────────────────────────

pub struct CreateVehicleInput {
    pub name: String,
    pub plate_number: String,
    pub seats: i64,
    pub color: Option<String>,
    pub photo: Vec<u8>,
}

pub struct CreateVehicleUseCase<V, O>
where
    V: VehicleRepository,
    O: ObjectStorage,
{
    pub vehicles: V,
    pub storage: O,
}

impl<V, O> CreateVehicleUseCase<V, O>
where
    V: VehicleRepository,
    O: ObjectStorage,
{
    pub async fn execute(
        &self,
        actor: &AuthUser,
        input: CreateVehicleInput,
    ) -> Result<Vehicle, ApiError> {
        require_permission(actor, Permission::CreateVehicle)?;
        if input.photo.is_empty() {
            return Err(ApiError::BadRequest("No photo uploaded".to_owned()));
        }

        let (name, plate_number, seats) = validate(&input)?;
        let slug = slug::slugify(&name);

        let photo_url = self.storage.upload_image(PHOTO_FOLDER, input.photo).await?;
        self.vehicles
            .create(&NewVehicle {
                name,
                slug,
                plate_number,
                seats,
                color: input.color.clone(),
                photo_url,
            })
            .await
    }
}

fn validate(input: &CreateVehicleInput) -> Result<(String, String, i32), ApiError> {
    let mut errors = Vec::new();
    let name = input.name.trim();
    if name.is_empty() {
        errors.push(FieldError::new("name", "Name is required."));
    }
    let plate_number = input.plate_number.trim();
    if plate_number.is_empty() {
        errors.push(FieldError::new("plateNumber", "Plate number is required."));
    }
    if input.seats < 1 || input.seats > i64::from(i32::MAX) {
        errors.push(FieldError::new("seats", "Seats must be at least 1"));
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    Ok((name.to_owned(), plate_number.to_owned(), input.seats as i32))
}
