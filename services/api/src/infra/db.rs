use anyhow::Context as _;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, FromQueryResult, IntoActiveModel as _, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, SqlErr, Statement, TransactionError, TransactionTrait,
};
use uuid::Uuid;

use skylift_api_schema::{
    airports, audit_logs, bookings, customers, employee_roles, employees, payments, ride_options,
    sessions, users, vehicles,
};
use skylift_domain::booking::BookingStatus;
use skylift_domain::employee::EmployeeType;
use skylift_domain::pagination::PageRequest;
use skylift_domain::payment::{PaymentMethod, PaymentStatus};
use skylift_domain::permission::Permission;

use crate::domain::repository::{
    AccountRepository, AirportRepository, AuditLogRepository, BookingRepository,
    EmployeeRepository, PaymentRepository, RideOptionRepository, RoleRepository,
    SessionRepository, VehicleRepository,
};
use crate::domain::types::{
    Airport, AuditEntry, AuthSession, AuthUser, Booking, CustomerAccount, EmployeeAccount,
    EmployeeRecord, LoginAccount, NewAirport, NewAuditEntry, NewBooking, NewCustomerSignup,
    NewEmployee, NewRideOption, NewRole, NewVehicle, Payment, RideOption, Role, RoleUpdate,
    SessionRecord, UserProfile, Vehicle,
};
use crate::error::ApiError;

/// A unique-constraint violation becomes `Conflict` with the given message;
/// anything else is internal.
fn conflict_on_unique(err: DbErr, message: &str, context: &'static str) -> ApiError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ApiError::Conflict(message.to_owned()),
        _ => ApiError::Internal(anyhow::Error::new(err).context(context)),
    }
}

fn txn_err(err: TransactionError<ApiError>, context: &'static str) -> ApiError {
    match err {
        TransactionError::Connection(e) => {
            ApiError::Internal(anyhow::Error::new(e).context(context))
        }
        TransactionError::Transaction(e) => e,
    }
}

/// Stored permission strings were validated on write; anything unrecognized
/// (a retired catalog entry) is skipped rather than failing the read.
fn permissions_from_stored(raw: &[String]) -> Vec<Permission> {
    raw.iter().filter_map(|s| Permission::from_name(s)).collect()
}

fn employee_type_from_column(raw: &str) -> Result<EmployeeType, ApiError> {
    EmployeeType::from_str(raw).ok_or_else(|| {
        ApiError::Internal(anyhow::anyhow!("unknown employee type in storage: {raw}"))
    })
}

fn booking_status_from_column(raw: &str) -> Result<BookingStatus, ApiError> {
    BookingStatus::from_str(raw).ok_or_else(|| {
        ApiError::Internal(anyhow::anyhow!("unknown booking status in storage: {raw}"))
    })
}

fn payment_status_from_column(raw: &str) -> Result<PaymentStatus, ApiError> {
    PaymentStatus::from_str(raw).ok_or_else(|| {
        ApiError::Internal(anyhow::anyhow!("unknown payment status in storage: {raw}"))
    })
}

// ── Account repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<LoginAccount>, ApiError> {
        let user = users::Entity::find()
            .filter(users::Column::PhoneNumber.eq(phone))
            .one(&self.db)
            .await
            .context("find user by phone")?;
        match user {
            Some(user) => Ok(Some(self.load_login_account(user).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<LoginAccount>, ApiError> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        match user {
            Some(user) => Ok(Some(self.load_login_account(user).await?)),
            None => Ok(None),
        }
    }

    async fn create_customer_account(
        &self,
        input: &NewCustomerSignup,
    ) -> Result<AuthUser, ApiError> {
        const DUPLICATE: &str = "A user with this email or phone number already exists";

        let input = input.clone();
        let user = self
            .db
            .transaction::<_, users::Model, ApiError>(|txn| {
                Box::pin(async move {
                    let now = Utc::now();
                    let user = users::ActiveModel {
                        id: Set(Uuid::now_v7()),
                        name: Set(input.name.clone()),
                        email: Set(Some(input.email.clone())),
                        phone_number: Set(Some(input.phone_number.clone())),
                        photo_url: Set(None),
                        hashed_password: Set(input.hashed_password.clone()),
                        is_active: Set(true),
                        created_at: Set(now),
                        updated_at: Set(now),
                    }
                    .insert(txn)
                    .await
                    .map_err(|e| conflict_on_unique(e, DUPLICATE, "insert user"))?;

                    // A phone-matched customer row without a user (staff
                    // pre-registration) is claimed instead of duplicated.
                    let existing = customers::Entity::find()
                        .filter(customers::Column::PhoneNumber.eq(input.phone_number.as_str()))
                        .one(txn)
                        .await
                        .context("find customer by phone")?;
                    match existing {
                        Some(row) if row.user_id.is_none() => {
                            let mut customer = row.into_active_model();
                            customer.name = Set(input.name.clone());
                            customer.user_id = Set(Some(user.id));
                            customer.updated_at = Set(now);
                            customer.update(txn).await.context("claim customer row")?;
                        }
                        Some(_) => return Err(ApiError::Conflict(DUPLICATE.to_owned())),
                        None => {
                            customers::ActiveModel {
                                id: Set(Uuid::now_v7()),
                                name: Set(input.name.clone()),
                                phone_number: Set(Some(input.phone_number.clone())),
                                user_id: Set(Some(user.id)),
                                created_at: Set(now),
                                updated_at: Set(now),
                            }
                            .insert(txn)
                            .await
                            .map_err(|e| conflict_on_unique(e, DUPLICATE, "insert customer"))?;
                        }
                    }
                    Ok(user)
                })
            })
            .await
            .map_err(|e| txn_err(e, "customer signup transaction"))?;

        let account = self.load_login_account(user).await?;
        Ok(account.user)
    }
}

impl DbAccountRepository {
    /// Attach the employee (with role) and customer sides plus the stored
    /// password hash.
    async fn load_login_account(&self, user: users::Model) -> Result<LoginAccount, ApiError> {
        let employee = employees::Entity::find()
            .filter(employees::Column::UserAccountId.eq(user.id))
            .find_also_related(employee_roles::Entity)
            .one(&self.db)
            .await
            .context("find employee side")?;
        let customer = customers::Entity::find()
            .filter(customers::Column::UserId.eq(user.id))
            .one(&self.db)
            .await
            .context("find customer side")?;

        let employee = employee
            .map(|(model, role)| {
                Ok::<_, ApiError>(EmployeeAccount {
                    id: model.id,
                    employee_type: employee_type_from_column(&model.employee_type)?,
                    is_online: model.is_online,
                    role: role.map(role_from_model),
                })
            })
            .transpose()?;

        let hashed_password = user.hashed_password.clone();
        Ok(LoginAccount {
            user: AuthUser {
                id: user.id,
                name: user.name,
                email: user.email,
                phone_number: user.phone_number,
                photo_url: user.photo_url,
                is_active: user.is_active,
                created_at: user.created_at,
                employee,
                customer: customer.map(customer_account_from_model),
            },
            hashed_password,
        })
    }
}

fn customer_account_from_model(model: customers::Model) -> CustomerAccount {
    CustomerAccount {
        id: model.id,
        name: model.name,
        phone_number: model.phone_number,
    }
}

// ── Session repository ───────────────────────────────────────────────────────

/// One round trip for the per-request gate: the session row joined to its
/// user, the optional employee side (with role) and the optional customer
/// side.
const FIND_AUTH_SQL: &str = r#"
SELECT s.id AS session_id, s.user_id, s.expires_at, s.user_agent,
       s.created_at AS session_created_at,
       u.name, u.email, u.phone_number, u.photo_url, u.is_active,
       u.created_at AS user_created_at,
       e.id AS employee_id, e.employee_type, e.is_online,
       r.id AS role_id, r.name AS role_name, r.slug AS role_slug,
       r.permissions AS role_permissions,
       r.created_at AS role_created_at, r.updated_at AS role_updated_at,
       c.id AS customer_id, c.name AS customer_name,
       c.phone_number AS customer_phone_number
FROM sessions s
JOIN users u ON u.id = s.user_id
LEFT JOIN employees e ON e.user_account_id = u.id
LEFT JOIN employee_roles r ON r.id = e.role_id
LEFT JOIN customers c ON c.user_id = u.id
WHERE s.id = $1
"#;

#[derive(Debug, FromQueryResult)]
struct AuthRow {
    session_id: String,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    user_agent: Option<String>,
    session_created_at: DateTime<Utc>,
    name: String,
    email: Option<String>,
    phone_number: Option<String>,
    photo_url: Option<String>,
    is_active: bool,
    user_created_at: DateTime<Utc>,
    employee_id: Option<Uuid>,
    employee_type: Option<String>,
    is_online: Option<bool>,
    role_id: Option<Uuid>,
    role_name: Option<String>,
    role_slug: Option<String>,
    role_permissions: Option<employee_roles::PermissionList>,
    role_created_at: Option<DateTime<Utc>>,
    role_updated_at: Option<DateTime<Utc>>,
    customer_id: Option<Uuid>,
    customer_name: Option<String>,
    customer_phone_number: Option<String>,
}

#[derive(Clone)]
pub struct DbSessionRepository {
    pub db: DatabaseConnection,
}

impl SessionRepository for DbSessionRepository {
    async fn create(&self, session: &SessionRecord) -> Result<(), ApiError> {
        sessions::ActiveModel {
            id: Set(session.id.clone()),
            user_id: Set(session.user_id),
            expires_at: Set(session.expires_at),
            user_agent: Set(session.user_agent.clone()),
            created_at: Set(session.created_at),
        }
        .insert(&self.db)
        .await
        .context("create session")?;
        Ok(())
    }

    async fn find_auth(&self, token: &str) -> Result<Option<AuthSession>, ApiError> {
        let row = AuthRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            FIND_AUTH_SQL,
            [token.into()],
        ))
        .one(&self.db)
        .await
        .context("resolve session")?;
        row.map(auth_session_from_row).transpose()
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SessionRecord>, ApiError> {
        let models = sessions::Entity::find()
            .filter(sessions::Column::UserId.eq(user_id))
            .order_by_desc(sessions::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list sessions")?;
        Ok(models.into_iter().map(session_from_model).collect())
    }

    async fn delete_for_user(&self, session_id: &str, user_id: Uuid) -> Result<bool, ApiError> {
        let result = sessions::Entity::delete_many()
            .filter(sessions::Column::Id.eq(session_id))
            .filter(sessions::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .context("delete session")?;
        Ok(result.rows_affected > 0)
    }
}

fn auth_session_from_row(row: AuthRow) -> Result<AuthSession, ApiError> {
    let employee = match (row.employee_id, row.employee_type, row.is_online) {
        (Some(id), Some(raw_type), Some(is_online)) => {
            let role = match (
                row.role_id,
                row.role_name,
                row.role_slug,
                row.role_created_at,
                row.role_updated_at,
            ) {
                (Some(id), Some(name), Some(slug), Some(created_at), Some(updated_at)) => {
                    let stored = row.role_permissions.map(|p| p.0).unwrap_or_default();
                    Some(Role {
                        id,
                        name,
                        slug,
                        permissions: permissions_from_stored(&stored),
                        created_at,
                        updated_at,
                    })
                }
                _ => None,
            };
            Some(EmployeeAccount {
                id,
                employee_type: employee_type_from_column(&raw_type)?,
                is_online,
                role,
            })
        }
        _ => None,
    };
    let customer = match (row.customer_id, row.customer_name) {
        (Some(id), Some(name)) => Some(CustomerAccount {
            id,
            name,
            phone_number: row.customer_phone_number,
        }),
        _ => None,
    };

    Ok(AuthSession {
        user: AuthUser {
            id: row.user_id,
            name: row.name,
            email: row.email,
            phone_number: row.phone_number,
            photo_url: row.photo_url,
            is_active: row.is_active,
            created_at: row.user_created_at,
            employee,
            customer,
        },
        session: SessionRecord {
            id: row.session_id,
            user_id: row.user_id,
            expires_at: row.expires_at,
            user_agent: row.user_agent,
            created_at: row.session_created_at,
        },
    })
}

fn session_from_model(model: sessions::Model) -> SessionRecord {
    SessionRecord {
        id: model.id,
        user_id: model.user_id,
        expires_at: model.expires_at,
        user_agent: model.user_agent,
        created_at: model.created_at,
    }
}

// ── Employee repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEmployeeRepository {
    pub db: DatabaseConnection,
}

impl EmployeeRepository for DbEmployeeRepository {
    async fn list(&self, page: PageRequest) -> Result<(Vec<EmployeeRecord>, u64), ApiError> {
        let total = employees::Entity::find()
            .count(&self.db)
            .await
            .context("count employees")?;
        let rows = employees::Entity::find()
            .find_also_related(employee_roles::Entity)
            .order_by_desc(employees::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list employees")?;

        let mut records = Vec::with_capacity(rows.len());
        for (employee, role) in rows {
            records.push(self.assemble(employee, role).await?);
        }
        Ok((records, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<EmployeeRecord>, ApiError> {
        let row = employees::Entity::find_by_id(id)
            .find_also_related(employee_roles::Entity)
            .one(&self.db)
            .await
            .context("find employee by id")?;
        match row {
            Some((employee, role)) => Ok(Some(self.assemble(employee, role).await?)),
            None => Ok(None),
        }
    }

    async fn create(&self, input: &NewEmployee) -> Result<EmployeeRecord, ApiError> {
        let input = input.clone();
        let (employee, user) = self
            .db
            .transaction::<_, (employees::Model, users::Model), ApiError>(|txn| {
                Box::pin(async move {
                    let now = Utc::now();
                    let user = users::ActiveModel {
                        id: Set(Uuid::now_v7()),
                        name: Set(input.name.clone()),
                        email: Set(Some(input.email.clone())),
                        phone_number: Set(Some(input.phone_number.clone())),
                        photo_url: Set(Some(input.photo_url.clone())),
                        hashed_password: Set(input.hashed_password.clone()),
                        is_active: Set(true),
                        created_at: Set(now),
                        updated_at: Set(now),
                    }
                    .insert(txn)
                    .await
                    .map_err(|e| {
                        conflict_on_unique(
                            e,
                            "A user with this email or phone number already exists",
                            "insert employee user",
                        )
                    })?;

                    let employee = employees::ActiveModel {
                        id: Set(Uuid::now_v7()),
                        user_account_id: Set(user.id),
                        employee_type: Set(input.employee_type.as_str().to_owned()),
                        is_online: Set(false),
                        role_id: Set(Some(input.role_id)),
                        created_at: Set(now),
                        updated_at: Set(now),
                    }
                    .insert(txn)
                    .await
                    .context("insert employee")?;

                    Ok((employee, user))
                })
            })
            .await
            .map_err(|e| txn_err(e, "create employee transaction"))?;

        let role = match employee.role_id {
            Some(role_id) => employee_roles::Entity::find_by_id(role_id)
                .one(&self.db)
                .await
                .context("find role for new employee")?,
            None => None,
        };
        Ok(EmployeeRecord {
            id: employee.id,
            employee_type: employee_type_from_column(&employee.employee_type)?,
            is_online: employee.is_online,
            user: user_profile_from_model(user),
            role: role.map(role_from_model),
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        })
    }
}

impl DbEmployeeRepository {
    async fn assemble(
        &self,
        employee: employees::Model,
        role: Option<employee_roles::Model>,
    ) -> Result<EmployeeRecord, ApiError> {
        let user = users::Entity::find_by_id(employee.user_account_id)
            .one(&self.db)
            .await
            .context("find employee user")?
            .ok_or_else(|| {
                ApiError::Internal(anyhow::anyhow!("employee {} has no user row", employee.id))
            })?;
        Ok(EmployeeRecord {
            id: employee.id,
            employee_type: employee_type_from_column(&employee.employee_type)?,
            is_online: employee.is_online,
            user: user_profile_from_model(user),
            role: role.map(role_from_model),
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        })
    }
}

fn user_profile_from_model(model: users::Model) -> UserProfile {
    UserProfile {
        id: model.id,
        name: model.name,
        email: model.email,
        phone_number: model.phone_number,
        photo_url: model.photo_url,
        is_active: model.is_active,
        created_at: model.created_at,
    }
}

// ── Role repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRoleRepository {
    pub db: DatabaseConnection,
}

impl RoleRepository for DbRoleRepository {
    async fn list(&self, page: PageRequest) -> Result<(Vec<Role>, u64), ApiError> {
        let total = employee_roles::Entity::find()
            .count(&self.db)
            .await
            .context("count roles")?;
        let models = employee_roles::Entity::find()
            .order_by_desc(employee_roles::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list roles")?;
        Ok((models.into_iter().map(role_from_model).collect(), total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, ApiError> {
        let model = employee_roles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find role by id")?;
        Ok(model.map(role_from_model))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Role>, ApiError> {
        let model = employee_roles::Entity::find()
            .filter(employee_roles::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .context("find role by slug")?;
        Ok(model.map(role_from_model))
    }

    async fn create(&self, role: &NewRole) -> Result<Role, ApiError> {
        let now = Utc::now();
        let model = employee_roles::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(role.name.clone()),
            slug: Set(role.slug.clone()),
            permissions: Set(permission_list(&role.permissions)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            conflict_on_unique(e, "Role with this name already exists.", "insert role")
        })?;
        Ok(role_from_model(model))
    }

    async fn update(&self, slug: &str, update: &RoleUpdate) -> Result<Option<Role>, ApiError> {
        let model = employee_roles::Entity::find()
            .filter(employee_roles::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .context("find role for update")?;
        let Some(model) = model else {
            return Ok(None);
        };

        let mut role = model.into_active_model();
        role.name = Set(update.name.clone());
        role.permissions = Set(permission_list(&update.permissions));
        role.updated_at = Set(Utc::now());
        let model = role.update(&self.db).await.map_err(|e| {
            conflict_on_unique(e, "Role with this name already exists.", "update role")
        })?;
        Ok(Some(role_from_model(model)))
    }

    async fn delete(&self, slug: &str) -> Result<bool, ApiError> {
        let result = employee_roles::Entity::delete_many()
            .filter(employee_roles::Column::Slug.eq(slug))
            .exec(&self.db)
            .await
            .context("delete role")?;
        Ok(result.rows_affected > 0)
    }
}

fn permission_list(permissions: &[Permission]) -> employee_roles::PermissionList {
    employee_roles::PermissionList(permissions.iter().map(|p| p.name().to_owned()).collect())
}

fn role_from_model(model: employee_roles::Model) -> Role {
    Role {
        id: model.id,
        name: model.name,
        slug: model.slug,
        permissions: permissions_from_stored(&model.permissions.0),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Airport repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAirportRepository {
    pub db: DatabaseConnection,
}

impl AirportRepository for DbAirportRepository {
    async fn list_all(&self) -> Result<Vec<Airport>, ApiError> {
        let models = airports::Entity::find()
            .order_by_asc(airports::Column::Name)
            .all(&self.db)
            .await
            .context("list airports")?;
        Ok(models.into_iter().map(airport_from_model).collect())
    }

    async fn list_active(&self) -> Result<Vec<Airport>, ApiError> {
        let models = airports::Entity::find()
            .filter(airports::Column::IsActive.eq(true))
            .order_by_asc(airports::Column::Name)
            .all(&self.db)
            .await
            .context("list active airports")?;
        Ok(models.into_iter().map(airport_from_model).collect())
    }

    async fn create(&self, input: &NewAirport) -> Result<Airport, ApiError> {
        let now = Utc::now();
        let model = airports::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name.clone()),
            code: Set(input.code.clone()),
            latitude: Set(input.latitude),
            longitude: Set(input.longitude),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            conflict_on_unique(
                e,
                "Airport with this name or code already exists",
                "insert airport",
            )
        })?;
        Ok(airport_from_model(model))
    }
}

fn airport_from_model(model: airports::Model) -> Airport {
    Airport {
        id: model.id,
        name: model.name,
        code: model.code,
        latitude: model.latitude,
        longitude: model.longitude,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Ride option repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRideOptionRepository {
    pub db: DatabaseConnection,
}

impl RideOptionRepository for DbRideOptionRepository {
    async fn list_active(&self) -> Result<Vec<RideOption>, ApiError> {
        let models = ride_options::Entity::find()
            .filter(ride_options::Column::IsActive.eq(true))
            .order_by_asc(ride_options::Column::Name)
            .all(&self.db)
            .await
            .context("list ride options")?;
        Ok(models.into_iter().map(ride_option_from_model).collect())
    }

    async fn create(&self, input: &NewRideOption) -> Result<RideOption, ApiError> {
        let now = Utc::now();
        let model = ride_options::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name.clone()),
            price_per_mile_ugx: Set(input.price_per_mile_ugx),
            price_per_mile_usd: Set(input.price_per_mile_usd),
            photo_url: Set(input.photo_url.clone()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .context("insert ride option")?;
        Ok(ride_option_from_model(model))
    }
}

fn ride_option_from_model(model: ride_options::Model) -> RideOption {
    RideOption {
        id: model.id,
        name: model.name,
        price_per_mile_ugx: model.price_per_mile_ugx,
        price_per_mile_usd: model.price_per_mile_usd,
        photo_url: model.photo_url,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Vehicle repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVehicleRepository {
    pub db: DatabaseConnection,
}

impl VehicleRepository for DbVehicleRepository {
    async fn list(&self, page: PageRequest) -> Result<(Vec<Vehicle>, u64), ApiError> {
        let total = vehicles::Entity::find()
            .count(&self.db)
            .await
            .context("count vehicles")?;
        let models = vehicles::Entity::find()
            .order_by_desc(vehicles::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list vehicles")?;
        Ok((models.into_iter().map(vehicle_from_model).collect(), total))
    }

    async fn create(&self, input: &NewVehicle) -> Result<Vehicle, ApiError> {
        let now = Utc::now();
        let model = vehicles::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name.clone()),
            slug: Set(input.slug.clone()),
            seats: Set(input.seats),
            primary_photo_url: Set(input.photo_url.clone()),
            plate_number: Set(input.plate_number.clone()),
            color: Set(input.color.clone()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            conflict_on_unique(
                e,
                "A vehicle with this name or plate number already exists",
                "insert vehicle",
            )
        })?;
        Ok(vehicle_from_model(model))
    }
}

fn vehicle_from_model(model: vehicles::Model) -> Vehicle {
    Vehicle {
        id: model.id,
        name: model.name,
        slug: model.slug,
        plate_number: model.plate_number,
        seats: model.seats,
        color: model.color,
        photo_url: model.primary_photo_url,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Booking repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBookingRepository {
    pub db: DatabaseConnection,
}

impl BookingRepository for DbBookingRepository {
    async fn create_with_payment(
        &self,
        input: &NewBooking,
    ) -> Result<(Booking, Payment), ApiError> {
        let input = input.clone();
        let (booking, payment) = self
            .db
            .transaction::<_, (bookings::Model, payments::Model), ApiError>(|txn| {
                Box::pin(async move {
                    airports::Entity::find_by_id(input.airport_id)
                        .one(txn)
                        .await
                        .context("find airport for booking")?
                        .ok_or(ApiError::NotFound("Airport"))?;
                    ride_options::Entity::find_by_id(input.ride_option_id)
                        .one(txn)
                        .await
                        .context("find ride option for booking")?
                        .ok_or(ApiError::NotFound("Ride option"))?;

                    let now = Utc::now();
                    let booking = bookings::ActiveModel {
                        id: Set(Uuid::now_v7()),
                        fare: Set(input.fare),
                        airport_id: Set(input.airport_id),
                        status: Set(BookingStatus::initial().as_str().to_owned()),
                        note: Set(input.note.clone()),
                        driver_id: Set(None),
                        vehicle_id: Set(None),
                        customer_id: Set(input.customer_id),
                        drop_off_latitude: Set(input.drop_off_latitude),
                        drop_off_longitude: Set(input.drop_off_longitude),
                        drop_off_location_name: Set(Some(input.drop_off_location_name.clone())),
                        created_at: Set(now),
                        updated_at: Set(now),
                    }
                    .insert(txn)
                    .await
                    .context("insert booking")?;

                    let payment = payments::ActiveModel {
                        id: Set(Uuid::now_v7()),
                        booking_id: Set(booking.id),
                        amount: Set(input.fare),
                        method: Set(None),
                        status: Set(PaymentStatus::Pending.as_str().to_owned()),
                        gateway_reference: Set(None),
                        created_at: Set(now),
                        updated_at: Set(now),
                    }
                    .insert(txn)
                    .await
                    .context("insert booking payment")?;

                    Ok((booking, payment))
                })
            })
            .await
            .map_err(|e| txn_err(e, "booking transaction"))?;

        Ok((booking_from_model(booking)?, payment_from_model(payment)?))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, ApiError> {
        let model = bookings::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find booking by id")?;
        model.map(booking_from_model).transpose()
    }

    async fn list_for_customer(&self, customer_id: Uuid) -> Result<Vec<Booking>, ApiError> {
        let models = bookings::Entity::find()
            .filter(bookings::Column::CustomerId.eq(customer_id))
            .order_by_desc(bookings::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list customer bookings")?;
        models.into_iter().map(booking_from_model).collect()
    }

    async fn list_all(&self) -> Result<Vec<Booking>, ApiError> {
        let models = bookings::Entity::find()
            .order_by_desc(bookings::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list bookings")?;
        models.into_iter().map(booking_from_model).collect()
    }

    async fn transition_status(
        &self,
        id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<bool, ApiError> {
        use sea_orm::sea_query::Expr;

        let result = bookings::Entity::update_many()
            .filter(bookings::Column::Id.eq(id))
            .filter(bookings::Column::Status.eq(from.as_str()))
            .col_expr(bookings::Column::Status, Expr::value(to.as_str()))
            .col_expr(bookings::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .context("transition booking status")?;
        Ok(result.rows_affected > 0)
    }
}

fn booking_from_model(model: bookings::Model) -> Result<Booking, ApiError> {
    Ok(Booking {
        id: model.id,
        fare: model.fare,
        airport_id: model.airport_id,
        status: booking_status_from_column(&model.status)?,
        note: model.note,
        drop_off_latitude: model.drop_off_latitude,
        drop_off_longitude: model.drop_off_longitude,
        drop_off_location_name: model.drop_off_location_name,
        customer_id: model.customer_id,
        driver_id: model.driver_id,
        vehicle_id: model.vehicle_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Payment repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPaymentRepository {
    pub db: DatabaseConnection,
}

impl PaymentRepository for DbPaymentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, ApiError> {
        let model = payments::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find payment by id")?;
        model.map(payment_from_model).transpose()
    }

    async fn settle(
        &self,
        id: Uuid,
        status: PaymentStatus,
        gateway_reference: &str,
    ) -> Result<bool, ApiError> {
        use sea_orm::sea_query::Expr;

        let result = payments::Entity::update_many()
            .filter(payments::Column::Id.eq(id))
            .filter(payments::Column::Status.eq(PaymentStatus::Pending.as_str()))
            .col_expr(payments::Column::Status, Expr::value(status.as_str()))
            .col_expr(
                payments::Column::GatewayReference,
                Expr::value(gateway_reference),
            )
            .col_expr(payments::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .context("settle payment")?;
        Ok(result.rows_affected > 0)
    }
}

fn payment_from_model(model: payments::Model) -> Result<Payment, ApiError> {
    let method = model
        .method
        .as_deref()
        .map(|raw| {
            PaymentMethod::from_str(raw).ok_or_else(|| {
                ApiError::Internal(anyhow::anyhow!("unknown payment method in storage: {raw}"))
            })
        })
        .transpose()?;
    Ok(Payment {
        id: model.id,
        booking_id: model.booking_id,
        amount: model.amount,
        method,
        status: payment_status_from_column(&model.status)?,
        gateway_reference: model.gateway_reference,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Audit log repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAuditLogRepository {
    pub db: DatabaseConnection,
}

impl AuditLogRepository for DbAuditLogRepository {
    async fn append(&self, entry: &NewAuditEntry) -> Result<(), ApiError> {
        audit_logs::ActiveModel {
            id: Set(Uuid::now_v7()),
            actor_id: Set(entry.actor_id),
            target_id: Set(entry.target_id.clone()),
            target_type: Set(entry.target_type.clone()),
            description: Set(entry.description.clone()),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .context("append audit entry")?;
        Ok(())
    }

    async fn list_for_day(&self, day: NaiveDate) -> Result<Vec<AuditEntry>, ApiError> {
        let start = day.and_time(NaiveTime::MIN).and_utc();
        let end = start + Duration::days(1);
        let models = audit_logs::Entity::find()
            .filter(audit_logs::Column::CreatedAt.gte(start))
            .filter(audit_logs::Column::CreatedAt.lt(end))
            .order_by_desc(audit_logs::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list audit entries for day")?;
        Ok(models.into_iter().map(audit_entry_from_model).collect())
    }
}

fn audit_entry_from_model(model: audit_logs::Model) -> AuditEntry {
    AuditEntry {
        id: model.id,
        actor_id: model.actor_id,
        target_id: model.target_id,
        target_type: model.target_type,
        description: model.description,
        created_at: model.created_at,
    }
}
