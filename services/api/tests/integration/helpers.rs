use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use skylift_api::domain::repository::{
    AccountRepository, AuditLogRepository, BookingRepository, EmployeeRepository, ObjectStorage,
    PaymentGateway, PaymentRepository, RoleRepository, SessionRepository,
};
use skylift_api::domain::types::{
    AuditEntry, AuthSession, AuthUser, Booking, CustomerAccount, EmployeeAccount, EmployeeRecord,
    GatewayVerification, LoginAccount, NewAuditEntry, NewBooking, NewCustomerSignup, NewEmployee,
    NewRole, Payment, PaymentTokenRequest, Role, RoleUpdate, SessionRecord, UserProfile,
};
use skylift_api::error::{ApiError, GatewayError};
use skylift_api::usecase::session::hash_password;
use skylift_domain::booking::BookingStatus;
use skylift_domain::employee::EmployeeType;
use skylift_domain::pagination::PageRequest;
use skylift_domain::payment::PaymentStatus;
use skylift_domain::permission::Permission;
use skylift_testing::fixture::{future, uuid_n};

// ── MockAccountRepo ──────────────────────────────────────────────────────────

pub struct MockAccountRepo {
    pub accounts: Vec<LoginAccount>,
    pub signups: Arc<Mutex<Vec<NewCustomerSignup>>>,
    /// Makes signup fail the way the users table's unique indexes do.
    pub email_or_phone_taken: bool,
}

impl MockAccountRepo {
    pub fn new(accounts: Vec<LoginAccount>) -> Self {
        Self {
            accounts,
            signups: Arc::new(Mutex::new(vec![])),
            email_or_phone_taken: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn taken() -> Self {
        Self {
            email_or_phone_taken: true,
            ..Self::empty()
        }
    }

    /// Shared handle to the recorded signups for post-execution inspection.
    pub fn signups_handle(&self) -> Arc<Mutex<Vec<NewCustomerSignup>>> {
        Arc::clone(&self.signups)
    }
}

impl AccountRepository for MockAccountRepo {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<LoginAccount>, ApiError> {
        Ok(self
            .accounts
            .iter()
            .find(|a| a.user.phone_number.as_deref() == Some(phone))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<LoginAccount>, ApiError> {
        Ok(self
            .accounts
            .iter()
            .find(|a| a.user.email.as_deref() == Some(email))
            .cloned())
    }

    async fn create_customer_account(
        &self,
        input: &NewCustomerSignup,
    ) -> Result<AuthUser, ApiError> {
        if self.email_or_phone_taken {
            return Err(ApiError::Conflict(
                "A user with this email or phone number already exists".to_owned(),
            ));
        }
        self.signups.lock().unwrap().push(input.clone());
        Ok(AuthUser {
            id: uuid_n(40),
            name: input.name.clone(),
            email: Some(input.email.clone()),
            phone_number: Some(input.phone_number.clone()),
            photo_url: None,
            is_active: true,
            created_at: Utc::now(),
            employee: None,
            customer: Some(CustomerAccount {
                id: uuid_n(41),
                name: input.name.clone(),
                phone_number: Some(input.phone_number.clone()),
            }),
        })
    }
}

// ── MockSessionRepo ──────────────────────────────────────────────────────────

pub struct MockSessionRepo {
    pub sessions: Arc<Mutex<Vec<SessionRecord>>>,
    pub auth: Option<AuthSession>,
}

impl MockSessionRepo {
    pub fn new(sessions: Vec<SessionRecord>) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(sessions)),
            auth: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// A repo that resolves exactly one token: the given auth session's own.
    pub fn resolving(auth: AuthSession) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(vec![auth.session.clone()])),
            auth: Some(auth),
        }
    }

    pub fn sessions_handle(&self) -> Arc<Mutex<Vec<SessionRecord>>> {
        Arc::clone(&self.sessions)
    }
}

impl SessionRepository for MockSessionRepo {
    async fn create(&self, session: &SessionRecord) -> Result<(), ApiError> {
        self.sessions.lock().unwrap().push(session.clone());
        Ok(())
    }

    async fn find_auth(&self, token: &str) -> Result<Option<AuthSession>, ApiError> {
        Ok(self.auth.clone().filter(|a| a.session.id == token))
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SessionRecord>, ApiError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_for_user(&self, session_id: &str, user_id: Uuid) -> Result<bool, ApiError> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| !(s.id == session_id && s.user_id == user_id));
        Ok(sessions.len() < before)
    }
}

// ── MockEmployeeRepo ─────────────────────────────────────────────────────────

pub struct MockEmployeeRepo {
    pub records: Vec<EmployeeRecord>,
    pub created: Arc<Mutex<Vec<NewEmployee>>>,
}

impl MockEmployeeRepo {
    pub fn new(records: Vec<EmployeeRecord>) -> Self {
        Self {
            records,
            created: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn created_handle(&self) -> Arc<Mutex<Vec<NewEmployee>>> {
        Arc::clone(&self.created)
    }
}

impl EmployeeRepository for MockEmployeeRepo {
    async fn list(&self, page: PageRequest) -> Result<(Vec<EmployeeRecord>, u64), ApiError> {
        let total = self.records.len() as u64;
        let items = self
            .records
            .iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .cloned()
            .collect();
        Ok((items, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<EmployeeRecord>, ApiError> {
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }

    async fn create(&self, input: &NewEmployee) -> Result<EmployeeRecord, ApiError> {
        self.created.lock().unwrap().push(input.clone());
        let now = Utc::now();
        Ok(EmployeeRecord {
            id: uuid_n(50),
            employee_type: input.employee_type,
            is_online: false,
            user: UserProfile {
                id: uuid_n(51),
                name: input.name.clone(),
                email: Some(input.email.clone()),
                phone_number: Some(input.phone_number.clone()),
                photo_url: Some(input.photo_url.clone()),
                is_active: true,
                created_at: now,
            },
            role: None,
            created_at: now,
            updated_at: now,
        })
    }
}

// ── MockRoleRepo ─────────────────────────────────────────────────────────────

pub struct MockRoleRepo {
    pub roles: Arc<Mutex<Vec<Role>>>,
    /// Makes create fail the way the roles table's unique indexes do.
    pub duplicate_name: bool,
}

impl MockRoleRepo {
    pub fn new(roles: Vec<Role>) -> Self {
        Self {
            roles: Arc::new(Mutex::new(roles)),
            duplicate_name: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn duplicating() -> Self {
        Self {
            duplicate_name: true,
            ..Self::empty()
        }
    }

    pub fn roles_handle(&self) -> Arc<Mutex<Vec<Role>>> {
        Arc::clone(&self.roles)
    }
}

impl RoleRepository for MockRoleRepo {
    async fn list(&self, _page: PageRequest) -> Result<(Vec<Role>, u64), ApiError> {
        let roles = self.roles.lock().unwrap();
        Ok((roles.clone(), roles.len() as u64))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, ApiError> {
        Ok(self.roles.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Role>, ApiError> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.slug == slug)
            .cloned())
    }

    async fn create(&self, role: &NewRole) -> Result<Role, ApiError> {
        if self.duplicate_name {
            return Err(ApiError::Conflict(
                "Role with this name already exists.".to_owned(),
            ));
        }
        let now = Utc::now();
        let role = Role {
            id: Uuid::new_v4(),
            name: role.name.clone(),
            slug: role.slug.clone(),
            permissions: role.permissions.clone(),
            created_at: now,
            updated_at: now,
        };
        self.roles.lock().unwrap().push(role.clone());
        Ok(role)
    }

    async fn update(&self, slug: &str, update: &RoleUpdate) -> Result<Option<Role>, ApiError> {
        let mut roles = self.roles.lock().unwrap();
        match roles.iter_mut().find(|r| r.slug == slug) {
            Some(role) => {
                role.name = update.name.clone();
                role.permissions = update.permissions.clone();
                role.updated_at = Utc::now();
                Ok(Some(role.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, slug: &str) -> Result<bool, ApiError> {
        let mut roles = self.roles.lock().unwrap();
        let before = roles.len();
        roles.retain(|r| r.slug != slug);
        Ok(roles.len() < before)
    }
}

// ── MockBookingRepo ──────────────────────────────────────────────────────────

pub struct MockBookingRepo {
    pub bookings: Arc<Mutex<Vec<Booking>>>,
    pub payments: Arc<Mutex<Vec<Payment>>>,
    /// Makes create fail as if the airport reference did not resolve.
    pub missing_reference: bool,
    /// Makes every guarded status update report a lost race.
    pub stale: bool,
}

impl MockBookingRepo {
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self {
            bookings: Arc::new(Mutex::new(bookings)),
            payments: Arc::new(Mutex::new(vec![])),
            missing_reference: false,
            stale: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn bookings_handle(&self) -> Arc<Mutex<Vec<Booking>>> {
        Arc::clone(&self.bookings)
    }

    pub fn payments_handle(&self) -> Arc<Mutex<Vec<Payment>>> {
        Arc::clone(&self.payments)
    }
}

impl BookingRepository for MockBookingRepo {
    async fn create_with_payment(
        &self,
        input: &NewBooking,
    ) -> Result<(Booking, Payment), ApiError> {
        if self.missing_reference {
            return Err(ApiError::NotFound("Airport"));
        }
        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            fare: input.fare,
            airport_id: input.airport_id,
            status: BookingStatus::initial(),
            note: input.note.clone(),
            drop_off_latitude: input.drop_off_latitude,
            drop_off_longitude: input.drop_off_longitude,
            drop_off_location_name: Some(input.drop_off_location_name.clone()),
            customer_id: input.customer_id,
            driver_id: None,
            vehicle_id: None,
            created_at: now,
            updated_at: now,
        };
        let payment = Payment {
            id: Uuid::new_v4(),
            booking_id: booking.id,
            amount: input.fare,
            method: None,
            status: PaymentStatus::Pending,
            gateway_reference: None,
            created_at: now,
            updated_at: now,
        };
        self.bookings.lock().unwrap().push(booking.clone());
        self.payments.lock().unwrap().push(payment.clone());
        Ok((booking, payment))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, ApiError> {
        Ok(self.bookings.lock().unwrap().iter().find(|b| b.id == id).cloned())
    }

    async fn list_for_customer(&self, customer_id: Uuid) -> Result<Vec<Booking>, ApiError> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Booking>, ApiError> {
        Ok(self.bookings.lock().unwrap().clone())
    }

    async fn transition_status(
        &self,
        id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<bool, ApiError> {
        if self.stale {
            return Ok(false);
        }
        let mut bookings = self.bookings.lock().unwrap();
        match bookings.iter_mut().find(|b| b.id == id && b.status == from) {
            Some(booking) => {
                booking.status = to;
                booking.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockPaymentRepo ──────────────────────────────────────────────────────────

pub struct MockPaymentRepo {
    pub payments: Arc<Mutex<Vec<Payment>>>,
    /// Makes settle lose the race: a rival delivery confirms the row first.
    pub stale: bool,
}

impl MockPaymentRepo {
    pub fn new(payments: Vec<Payment>) -> Self {
        Self {
            payments: Arc::new(Mutex::new(payments)),
            stale: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn payments_handle(&self) -> Arc<Mutex<Vec<Payment>>> {
        Arc::clone(&self.payments)
    }
}

impl PaymentRepository for MockPaymentRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, ApiError> {
        Ok(self.payments.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn settle(
        &self,
        id: Uuid,
        status: PaymentStatus,
        gateway_reference: &str,
    ) -> Result<bool, ApiError> {
        let mut payments = self.payments.lock().unwrap();
        if self.stale {
            if let Some(payment) = payments.iter_mut().find(|p| p.id == id) {
                payment.status = PaymentStatus::Confirmed;
                payment.gateway_reference = Some("RIVAL-TOKEN".to_owned());
            }
            return Ok(false);
        }
        match payments
            .iter_mut()
            .find(|p| p.id == id && p.status == PaymentStatus::Pending)
        {
            Some(payment) => {
                payment.status = status;
                payment.gateway_reference = Some(gateway_reference.to_owned());
                payment.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockAuditRepo ────────────────────────────────────────────────────────────

pub struct MockAuditRepo {
    pub appended: Arc<Mutex<Vec<NewAuditEntry>>>,
    pub stored: Vec<AuditEntry>,
}

impl MockAuditRepo {
    pub fn empty() -> Self {
        Self {
            appended: Arc::new(Mutex::new(vec![])),
            stored: vec![],
        }
    }

    pub fn with_entries(stored: Vec<AuditEntry>) -> Self {
        Self {
            stored,
            ..Self::empty()
        }
    }

    pub fn appended_handle(&self) -> Arc<Mutex<Vec<NewAuditEntry>>> {
        Arc::clone(&self.appended)
    }
}

impl AuditLogRepository for MockAuditRepo {
    async fn append(&self, entry: &NewAuditEntry) -> Result<(), ApiError> {
        self.appended.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn list_for_day(&self, day: chrono::NaiveDate) -> Result<Vec<AuditEntry>, ApiError> {
        Ok(self
            .stored
            .iter()
            .filter(|e| e.created_at.date_naive() == day)
            .cloned()
            .collect())
    }
}

// ── MockStorage ──────────────────────────────────────────────────────────────

pub struct MockStorage {
    pub uploads: Arc<Mutex<Vec<String>>>,
}

impl MockStorage {
    pub fn empty() -> Self {
        Self {
            uploads: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Folders the mock received uploads for, in order.
    pub fn uploads_handle(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.uploads)
    }
}

impl ObjectStorage for MockStorage {
    async fn upload_image(&self, folder: &str, _bytes: Vec<u8>) -> Result<String, ApiError> {
        self.uploads.lock().unwrap().push(folder.to_owned());
        Ok(format!("https://cdn.test/{folder}/photo.png"))
    }
}

// ── MockGateway ──────────────────────────────────────────────────────────────

pub struct MockGateway {
    /// Token createToken returns; `None` fails the call with a timeout.
    pub token: Option<String>,
    /// Result code verifyToken reports. `000` approves.
    pub verify_code: String,
    pub token_requests: Arc<Mutex<Vec<PaymentTokenRequest>>>,
    pub verified_tokens: Arc<Mutex<Vec<String>>>,
}

impl MockGateway {
    pub fn approving(token: &str) -> Self {
        Self {
            token: Some(token.to_owned()),
            verify_code: "000".to_owned(),
            token_requests: Arc::new(Mutex::new(vec![])),
            verified_tokens: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn declining(code: &str) -> Self {
        Self {
            verify_code: code.to_owned(),
            ..Self::approving("DECLINED-TOKEN")
        }
    }

    pub fn timing_out() -> Self {
        Self {
            token: None,
            ..Self::approving("")
        }
    }

    pub fn token_requests_handle(&self) -> Arc<Mutex<Vec<PaymentTokenRequest>>> {
        Arc::clone(&self.token_requests)
    }

    pub fn verified_tokens_handle(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.verified_tokens)
    }
}

impl PaymentGateway for MockGateway {
    async fn create_token(&self, request: &PaymentTokenRequest) -> Result<String, GatewayError> {
        self.token_requests.lock().unwrap().push(request.clone());
        match &self.token {
            Some(token) => Ok(token.clone()),
            None => Err(GatewayError::Timeout),
        }
    }

    async fn verify_token(&self, token: &str) -> Result<GatewayVerification, GatewayError> {
        self.verified_tokens.lock().unwrap().push(token.to_owned());
        Ok(GatewayVerification {
            result_code: self.verify_code.clone(),
            explanation: None,
        })
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub const TEST_PASSWORD: &str = "correct horse battery";

pub fn customer_user(customer_id: Uuid) -> AuthUser {
    AuthUser {
        id: uuid_n(1),
        name: "Amina".to_owned(),
        email: Some("amina@example.com".to_owned()),
        phone_number: Some("+256700000001".to_owned()),
        photo_url: None,
        is_active: true,
        created_at: Utc::now(),
        employee: None,
        customer: Some(CustomerAccount {
            id: customer_id,
            name: "Amina".to_owned(),
            phone_number: Some("+256700000001".to_owned()),
        }),
    }
}

pub fn employee_user(employee_type: EmployeeType, permissions: &[Permission]) -> AuthUser {
    AuthUser {
        id: uuid_n(2),
        name: "Okello".to_owned(),
        email: Some("okello@example.com".to_owned()),
        phone_number: Some("+256700000002".to_owned()),
        photo_url: None,
        is_active: true,
        created_at: Utc::now(),
        employee: Some(EmployeeAccount {
            id: uuid_n(3),
            employee_type,
            is_online: false,
            role: Some(Role {
                id: uuid_n(4),
                name: "Ops".to_owned(),
                slug: "ops".to_owned(),
                permissions: permissions.to_vec(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }),
        }),
        customer: None,
    }
}

pub async fn account_for(user: AuthUser, password: &str) -> LoginAccount {
    LoginAccount {
        hashed_password: hash_password(password.to_owned()).await.unwrap(),
        user,
    }
}

pub fn session_for(user_id: Uuid) -> SessionRecord {
    SessionRecord {
        id: "f".repeat(64),
        user_id,
        expires_at: future(),
        user_agent: Some("integration-tests".to_owned()),
        created_at: Utc::now(),
    }
}

pub fn booking_for(customer_id: Uuid, status: BookingStatus) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        fare: 120_000.0,
        airport_id: uuid_n(10),
        status,
        note: None,
        drop_off_latitude: 0.31,
        drop_off_longitude: 32.58,
        drop_off_location_name: Some("Kololo".to_owned()),
        customer_id,
        driver_id: None,
        vehicle_id: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn pending_payment(booking_id: Uuid) -> Payment {
    Payment {
        id: Uuid::new_v4(),
        booking_id,
        amount: 120_000.0,
        method: None,
        status: PaymentStatus::Pending,
        gateway_reference: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn sample_role(name: &str, permissions: Vec<Permission>) -> Role {
    Role {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        slug: name.to_lowercase().replace(' ', "-"),
        permissions,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn employee_record(n: u8, name: &str) -> EmployeeRecord {
    EmployeeRecord {
        id: uuid_n(n),
        employee_type: EmployeeType::Driver,
        is_online: false,
        user: UserProfile {
            id: uuid_n(n + 60),
            name: name.to_owned(),
            email: Some(format!("{}@example.com", name.to_lowercase())),
            phone_number: None,
            photo_url: None,
            is_active: true,
            created_at: Utc::now(),
        },
        role: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn audit_entry_at(created_at: DateTime<Utc>, description: &str) -> AuditEntry {
    AuditEntry {
        id: Uuid::new_v4(),
        actor_id: None,
        target_id: None,
        target_type: None,
        description: description.to_owned(),
        created_at,
    }
}
