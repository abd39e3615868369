#![allow(async_fn_in_trait)]

use chrono::NaiveDate;
use uuid::Uuid;

use skylift_domain::booking::BookingStatus;
use skylift_domain::pagination::PageRequest;
use skylift_domain::payment::PaymentStatus;

use crate::domain::types::{
    Airport, AuditEntry, AuthSession, Booking, EmployeeRecord, GatewayVerification, LoginAccount,
    NewAirport, NewAuditEntry, NewBooking, NewCustomerSignup, NewEmployee, NewRideOption, NewRole,
    NewVehicle, Payment, PaymentTokenRequest, RideOption, Role, RoleUpdate, SessionRecord, Vehicle,
};
use crate::error::{ApiError, GatewayError};

/// Login and signup lookups over the users table.
pub trait AccountRepository: Send + Sync {
    /// Find a user by phone number with employee/role/customer attached,
    /// plus the stored password hash.
    async fn find_by_phone(&self, phone: &str) -> Result<Option<LoginAccount>, ApiError>;

    /// Same lookup by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<LoginAccount>, ApiError>;

    /// Create a User and its Customer in one transaction, claiming a
    /// pre-existing phone-matched customer row when one exists. Fails
    /// `Conflict` on a duplicate email or phone, leaving no partial rows.
    async fn create_customer_account(
        &self,
        input: &NewCustomerSignup,
    ) -> Result<crate::domain::types::AuthUser, ApiError>;
}

/// Session storage.
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &SessionRecord) -> Result<(), ApiError>;

    /// Resolve a token to its session plus the joined user, employee, role
    /// and customer in a single query. Expiry is NOT filtered here; the
    /// caller decides what an expired row means.
    async fn find_auth(&self, token: &str) -> Result<Option<AuthSession>, ApiError>;

    /// The user's sessions, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SessionRecord>, ApiError>;

    /// Delete one of the user's own sessions. Returns `false` when no
    /// session with that id belongs to the user.
    async fn delete_for_user(&self, session_id: &str, user_id: Uuid) -> Result<bool, ApiError>;
}

/// Employee listing and creation.
pub trait EmployeeRepository: Send + Sync {
    async fn list(&self, page: PageRequest) -> Result<(Vec<EmployeeRecord>, u64), ApiError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<EmployeeRecord>, ApiError>;

    /// Create the User and Employee rows in one transaction. Fails
    /// `Conflict` when a user with the email or phone already exists.
    async fn create(&self, input: &NewEmployee) -> Result<EmployeeRecord, ApiError>;
}

/// Role storage. Roles are addressed by slug everywhere but creation.
pub trait RoleRepository: Send + Sync {
    async fn list(&self, page: PageRequest) -> Result<(Vec<Role>, u64), ApiError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, ApiError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Role>, ApiError>;

    /// Fails `Conflict` on a duplicate name or slug.
    async fn create(&self, role: &NewRole) -> Result<Role, ApiError>;

    /// Full replacement of name and permissions. `None` when the slug is
    /// unknown. The slug itself never changes.
    async fn update(&self, slug: &str, update: &RoleUpdate) -> Result<Option<Role>, ApiError>;

    /// Returns `false` when the slug is unknown. Employees holding the role
    /// keep running with role = null.
    async fn delete(&self, slug: &str) -> Result<bool, ApiError>;
}

pub trait AirportRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Airport>, ApiError>;

    async fn list_active(&self) -> Result<Vec<Airport>, ApiError>;

    /// Fails `Conflict` on a duplicate name or code.
    async fn create(&self, input: &NewAirport) -> Result<Airport, ApiError>;
}

pub trait RideOptionRepository: Send + Sync {
    async fn list_active(&self) -> Result<Vec<RideOption>, ApiError>;

    async fn create(&self, input: &NewRideOption) -> Result<RideOption, ApiError>;
}

pub trait VehicleRepository: Send + Sync {
    async fn list(&self, page: PageRequest) -> Result<(Vec<Vehicle>, u64), ApiError>;

    /// Fails `Conflict` on a duplicate name or plate number.
    async fn create(&self, input: &NewVehicle) -> Result<Vehicle, ApiError>;
}

/// Booking storage. Creation always pairs the booking with a pending
/// payment in the same transaction.
pub trait BookingRepository: Send + Sync {
    /// Resolve airport and ride option, insert the booking in its initial
    /// state and the pending payment, all in one transaction. `NotFound`
    /// aborts everything when a reference is missing.
    async fn create_with_payment(
        &self,
        input: &NewBooking,
    ) -> Result<(Booking, Payment), ApiError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, ApiError>;

    async fn list_for_customer(&self, customer_id: Uuid) -> Result<Vec<Booking>, ApiError>;

    async fn list_all(&self) -> Result<Vec<Booking>, ApiError>;

    /// Guarded move: `UPDATE ... WHERE status = from`. Returns `false` when
    /// the row was no longer in `from`, so concurrent moves cannot
    /// double-apply.
    async fn transition_status(
        &self,
        id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<bool, ApiError>;
}

pub trait PaymentRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, ApiError>;

    /// Settle a pending payment: `UPDATE ... WHERE status = 'pending'`.
    /// Returns `false` when the payment was already settled, so redelivered
    /// callbacks cannot double-apply.
    async fn settle(
        &self,
        id: Uuid,
        status: PaymentStatus,
        gateway_reference: &str,
    ) -> Result<bool, ApiError>;
}

/// Append-only audit trail.
pub trait AuditLogRepository: Send + Sync {
    async fn append(&self, entry: &NewAuditEntry) -> Result<(), ApiError>;

    /// Entries created on the given UTC day, newest first.
    async fn list_for_day(&self, day: NaiveDate) -> Result<Vec<AuditEntry>, ApiError>;
}

/// Object storage for uploaded photos.
pub trait ObjectStorage: Send + Sync {
    /// Re-encode the image as PNG and upload it under
    /// `{folder}/{uuid}.png`; returns the public URL. An undecodable image
    /// fails validation on the `photo` field; an oversized object maps to
    /// `PayloadTooLarge`.
    async fn upload_image(&self, folder: &str, bytes: Vec<u8>) -> Result<String, ApiError>;
}

/// Outbound payment gateway calls.
pub trait PaymentGateway: Send + Sync {
    /// createToken: returns the transaction token for the hosted payment
    /// page redirect.
    async fn create_token(&self, request: &PaymentTokenRequest) -> Result<String, GatewayError>;

    /// verifyToken: the authoritative payment state for a token.
    async fn verify_token(&self, token: &str) -> Result<GatewayVerification, GatewayError>;
}
