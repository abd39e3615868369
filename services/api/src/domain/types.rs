use chrono::{DateTime, Utc};
use uuid::Uuid;

use skylift_domain::booking::BookingStatus;
use skylift_domain::employee::EmployeeType;
use skylift_domain::payment::{PaymentMethod, PaymentStatus};
use skylift_domain::permission::Permission;

/// Session token length in bytes before hex encoding (256 bits → 64 chars).
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Session lifetime.
pub const SESSION_TTL_DAYS: i64 = 90;

/// A user with the account data the authorization check runs over:
/// the employee account (with its role) and the customer account, both
/// optional.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub photo_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub employee: Option<EmployeeAccount>,
    pub customer: Option<CustomerAccount>,
}

impl AuthUser {
    /// True iff an attached employee account's role carries the permission.
    /// Missing employee account or role yields false, never an error.
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.role_permissions()
            .is_some_and(|perms| perms.contains(&permission))
    }

    /// OR over a required list.
    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.has_permission(*p))
    }

    /// AND over a required list.
    pub fn has_all_permissions(&self, permissions: &[Permission]) -> bool {
        permissions.iter().all(|p| self.has_permission(*p))
    }

    fn role_permissions(&self) -> Option<&[Permission]> {
        self.employee
            .as_ref()?
            .role
            .as_ref()
            .map(|role| role.permissions.as_slice())
    }
}

/// Staff side of a user.
#[derive(Debug, Clone)]
pub struct EmployeeAccount {
    pub id: Uuid,
    pub employee_type: EmployeeType,
    pub is_online: bool,
    pub role: Option<Role>,
}

/// Rider side of a user.
#[derive(Debug, Clone)]
pub struct CustomerAccount {
    pub id: Uuid,
    pub name: String,
    pub phone_number: Option<String>,
}

/// Named permission bundle.
#[derive(Debug, Clone)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub permissions: Vec<Permission>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stored session row. The id is the opaque token the client presents.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub id: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn is_valid(&self) -> bool {
        self.expires_at > Utc::now()
    }
}

/// A resolved session: the gate's output, attached to the request.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: AuthUser,
    pub session: SessionRecord,
}

/// Login lookup result: the resolved user plus the stored password hash.
#[derive(Debug, Clone)]
pub struct LoginAccount {
    pub user: AuthUser,
    pub hashed_password: String,
}

/// Customer signup input, password already hashed.
#[derive(Debug, Clone)]
pub struct NewCustomerSignup {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub hashed_password: String,
}

/// Employee + its user row, as listed and fetched.
#[derive(Debug, Clone)]
pub struct EmployeeRecord {
    pub id: Uuid,
    pub employee_type: EmployeeType,
    pub is_online: bool,
    pub user: UserProfile,
    pub role: Option<Role>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User fields exposed on employee listings and profiles.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub photo_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Employee creation input, photo already uploaded and password hashed.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub hashed_password: String,
    pub photo_url: String,
    pub employee_type: EmployeeType,
    pub role_id: Uuid,
}

/// Role creation input, permissions already parsed against the catalog.
#[derive(Debug, Clone)]
pub struct NewRole {
    pub name: String,
    pub slug: String,
    pub permissions: Vec<Permission>,
}

/// Full-replacement role update.
#[derive(Debug, Clone)]
pub struct RoleUpdate {
    pub name: String,
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone)]
pub struct Airport {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAirport {
    pub name: String,
    pub code: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone)]
pub struct RideOption {
    pub id: Uuid,
    pub name: String,
    pub price_per_mile_ugx: f64,
    pub price_per_mile_usd: f64,
    pub photo_url: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRideOption {
    pub name: String,
    pub price_per_mile_ugx: f64,
    pub price_per_mile_usd: f64,
    pub photo_url: String,
}

#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub plate_number: String,
    pub seats: i32,
    pub color: Option<String>,
    pub photo_url: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub name: String,
    pub slug: String,
    pub plate_number: String,
    pub seats: i32,
    pub color: Option<String>,
    pub photo_url: String,
}

#[derive(Debug, Clone)]
pub struct Booking {
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Booking creation input. The paired pending payment takes its amount from
/// `fare`.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub customer_id: Uuid,
    pub airport_id: Uuid,
    pub ride_option_id: Uuid,
    pub fare: f64,
    pub drop_off_latitude: f64,
    pub drop_off_longitude: f64,
    pub drop_off_location_name: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Payment {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub amount: f64,
    pub method: Option<PaymentMethod>,
    pub status: PaymentStatus,
    pub gateway_reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: Uuid,
    pub actor_id: Option<Uuid>,
    pub target_id: Option<String>,
    pub target_type: Option<String>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    pub actor_id: Option<Uuid>,
    pub target_id: Option<String>,
    pub target_type: Option<String>,
    pub description: String,
}

/// createToken call parameters. `company_ref` is the payment row id the
/// gateway hands back on the callback.
#[derive(Debug, Clone)]
pub struct PaymentTokenRequest {
    pub amount: f64,
    pub currency: skylift_domain::currency::Currency,
    pub company_ref: Uuid,
    pub redirect_url: String,
    pub back_url: String,
}

/// verifyToken outcome. `000` means the payment went through.
#[derive(Debug, Clone)]
pub struct GatewayVerification {
    pub result_code: String,
    pub explanation: Option<String>,
}

impl GatewayVerification {
    pub fn is_approved(&self) -> bool {
        self.result_code == "000"
    }
}
