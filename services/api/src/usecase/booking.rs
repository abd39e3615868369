use skylift_domain::booking::{self, BookingStatus};
use skylift_domain::currency::Currency;
use skylift_domain::employee::EmployeeType;
use skylift_domain::permission::Permission;
use uuid::Uuid;

use crate::domain::repository::{AuditLogRepository, BookingRepository, PaymentGateway};
use crate::domain::types::{
    AuthUser, Booking, NewAuditEntry, NewBooking, Payment, PaymentTokenRequest,
};
use crate::error::{ApiError, FieldError};
use crate::usecase::require_permission;

// ── CreateBooking ────────────────────────────────────────────────────────────

pub struct CreateBookingInput {
    pub airport_id: Uuid,
    pub ride_option_id: Uuid,
    pub fare: f64,
    pub currency: Currency,
    pub drop_off_latitude: f64,
    pub drop_off_longitude: f64,
    pub drop_off_name: String,
    pub note: Option<String>,
}

#[derive(Debug)]
pub struct CreateBookingOutput {
    pub booking: Booking,
    pub payment: Payment,
    pub payment_token: Option<String>,
    pub payment_token_error: Option<&'static str>,
}

pub struct CreateBookingUseCase<B, G, L>
where
    B: BookingRepository,
    G: PaymentGateway,
    L: AuditLogRepository,
{
    pub bookings: B,
    pub gateway: G,
    pub audit: L,
    /// Public base URL the gateway redirects back to after payment.
    pub redirect_base_url: String,
}

impl<B, G, L> CreateBookingUseCase<B, G, L>
where
    B: BookingRepository,
    G: PaymentGateway,
    L: AuditLogRepository,
{
    pub async fn execute(
        &self,
        actor: &AuthUser,
        input: CreateBookingInput,
    ) -> Result<CreateBookingOutput, ApiError> {
        // 1. Bookings belong to customer accounts.
        let Some(customer) = &actor.customer else {
            return Err(ApiError::Unauthorized);
        };

        // 2. Validate the fare and drop-off fields.
        validate(&input)?;

        // 3. Booking + pending payment in one transaction; missing airport or
        //    ride option aborts before anything is written.
        let (booking, payment) = self
            .bookings
            .create_with_payment(&NewBooking {
                customer_id: customer.id,
                airport_id: input.airport_id,
                ride_option_id: input.ride_option_id,
                fare: input.fare,
                drop_off_latitude: input.drop_off_latitude,
                drop_off_longitude: input.drop_off_longitude,
                drop_off_location_name: input.drop_off_name.trim().to_owned(),
                note: input.note.clone(),
            })
            .await?;

        self.audit
            .append(&NewAuditEntry {
                actor_id: None,
                target_id: Some(booking.id.to_string()),
                target_type: Some("Booking".to_owned()),
                description: format!("Booking {} created", booking.id),
            })
            .await?;

        // 4. Ask the gateway for a hosted-page token. The booking is already
        //    durable, so a gateway failure degrades the response instead of
        //    failing it; the client retries payment from the booking screen.
        let callback_url = format!(
            "{}/payments/{}/callback",
            self.redirect_base_url.trim_end_matches('/'),
            payment.id
        );
        let (payment_token, payment_token_error) = match self
            .gateway
            .create_token(&PaymentTokenRequest {
                amount: booking.fare,
                currency: input.currency,
                company_ref: payment.id,
                redirect_url: callback_url.clone(),
                back_url: callback_url,
            })
            .await
        {
            Ok(token) => (Some(token), None),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    payment_id = %payment.id,
                    "payment token request failed"
                );
                (None, Some("Payment token request failed"))
            }
        };

        Ok(CreateBookingOutput {
            booking,
            payment,
            payment_token,
            payment_token_error,
        })
    }
}

fn validate(input: &CreateBookingInput) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    if !(input.fare > 0.0 && input.fare.is_finite()) {
        errors.push(FieldError::new("fare", "Fare must be greater than 0"));
    }
    if !(-90.0..=90.0).contains(&input.drop_off_latitude) {
        errors.push(FieldError::new(
            "dropOffLatitude",
            "Latitude must be within -90 and 90",
        ));
    }
    if !(-180.0..=180.0).contains(&input.drop_off_longitude) {
        errors.push(FieldError::new(
            "dropOffLongitude",
            "Longitude must be within -180 and 180",
        ));
    }
    if input.drop_off_name.trim().is_empty() {
        errors.push(FieldError::new("dropOffName", "Drop-off name is required."));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}

// ── ListBookings ─────────────────────────────────────────────────────────────

pub struct ListBookingsUseCase<B: BookingRepository> {
    pub bookings: B,
}

impl<B: BookingRepository> ListBookingsUseCase<B> {
    /// Customers see their own bookings; employees holding `view customer`
    /// see everything.
    pub async fn execute(&self, actor: &AuthUser) -> Result<Vec<Booking>, ApiError> {
        if let Some(customer) = &actor.customer {
            return self.bookings.list_for_customer(customer.id).await;
        }
        require_permission(actor, Permission::ViewCustomer)?;
        self.bookings.list_all().await
    }
}

// ── TransitionBooking ────────────────────────────────────────────────────────

pub struct TransitionBookingUseCase<B, L>
where
    B: BookingRepository,
    L: AuditLogRepository,
{
    pub bookings: B,
    pub audit: L,
}

impl<B, L> TransitionBookingUseCase<B, L>
where
    B: BookingRepository,
    L: AuditLogRepository,
{
    pub async fn execute(
        &self,
        actor: &AuthUser,
        booking_id: Uuid,
        target: BookingStatus,
    ) -> Result<Booking, ApiError> {
        // 1. The booking must exist.
        let mut booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or(ApiError::NotFound("Booking"))?;

        // 2. Actor legality first, then transition legality, so a customer
        //    poking at someone else's booking learns nothing about its state.
        authorize_transition(actor, &booking, target)?;
        booking::validate_transition(booking.status, target)
            .map_err(|e| ApiError::invalid("status", e.to_string()))?;

        // 3. Guarded move; losing a race surfaces as Conflict, not a silent
        //    double-apply.
        let moved = self
            .bookings
            .transition_status(booking.id, booking.status, target)
            .await?;
        if !moved {
            return Err(ApiError::Conflict("Booking status has changed".to_owned()));
        }

        self.audit
            .append(&NewAuditEntry {
                actor_id: actor.employee.as_ref().map(|e| e.id),
                target_id: Some(booking.id.to_string()),
                target_type: Some("Booking".to_owned()),
                description: format!("Booking {} moved to {}", booking.id, target),
            })
            .await?;

        booking.status = target;
        Ok(booking)
    }
}

/// Which parties may attempt which moves. Transition legality (against the
/// lifecycle) is checked separately.
fn authorize_transition(
    actor: &AuthUser,
    booking: &Booking,
    target: BookingStatus,
) -> Result<(), ApiError> {
    if let Some(customer) = &actor.customer {
        let own = booking.customer_id == customer.id;
        return if own && target == BookingStatus::CancelledByCustomer {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        };
    }
    if let Some(employee) = &actor.employee {
        return match employee.employee_type {
            EmployeeType::Admin => Ok(()),
            EmployeeType::Driver => {
                if matches!(
                    target,
                    BookingStatus::CancelledByCustomer | BookingStatus::CancelledByAdmin
                ) {
                    Err(ApiError::Forbidden)
                } else {
                    Ok(())
                }
            }
            EmployeeType::Rider => Err(ApiError::Forbidden),
        };
    }
    Err(ApiError::Unauthorized)
}
