use crate::domain::repository::{ObjectStorage, RideOptionRepository};
use crate::domain::types::{AuthUser, NewRideOption, RideOption};
use crate::error::{ApiError, FieldError};

/// Bucket folder for ride option photos.
const PHOTO_FOLDER: &str = "airport-pickup-ride-options";

// ── ListRideOptions ──────────────────────────────────────────────────────────

pub struct ListRideOptionsUseCase<R: RideOptionRepository> {
    pub ride_options: R,
}

impl<R: RideOptionRepository> ListRideOptionsUseCase<R> {
    /// Active options only; any authenticated account may list them.
    pub async fn execute(&self) -> Result<Vec<RideOption>, ApiError> {
        self.ride_options.list_active().await
    }
}

// ── CreateRideOption ─────────────────────────────────────────────────────────

pub struct CreateRideOptionInput {
    pub name: String,
    pub price_per_mile_ugx: f64,
    pub price_per_mile_usd: f64,
    /// Raw photo bytes from the multipart part; empty means none was sent.
    pub photo: Vec<u8>,
}

pub struct CreateRideOptionUseCase<R, O>
where
    R: RideOptionRepository,
    O: ObjectStorage,
{
    pub ride_options: R,
    pub storage: O,
}

impl<R, O> CreateRideOptionUseCase<R, O>
where
    R: RideOptionRepository,
    O: ObjectStorage,
{
    pub async fn execute(
        &self,
        actor: &AuthUser,
        input: CreateRideOptionInput,
    ) -> Result<RideOption, ApiError> {
        if actor.employee.is_none() {
            return Err(ApiError::Unauthorized);
        }
        if input.photo.is_empty() {
            return Err(ApiError::BadRequest("No photo uploaded".to_owned()));
        }

        validate(&input)?;

        let photo_url = self.storage.upload_image(PHOTO_FOLDER, input.photo).await?;
        self.ride_options
            .create(&NewRideOption {
                name: input.name.trim().to_owned(),
                price_per_mile_ugx: input.price_per_mile_ugx,
                price_per_mile_usd: input.price_per_mile_usd,
                photo_url,
            })
            .await
    }
}

fn validate(input: &CreateRideOptionInput) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    if input.name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required."));
    }
    if input.price_per_mile_ugx <= 0.0 {
        errors.push(FieldError::new(
            "pricePerMileUgx",
            "Price per mile must be greater than 0",
        ));
    }
    if input.price_per_mile_usd <= 0.0 {
        errors.push(FieldError::new(
            "pricePerMileUsd",
            "Price per mile must be greater than 0",
        ));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}
