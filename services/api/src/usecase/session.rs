use anyhow::Context as _;
use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use chrono::{Duration, Utc};
use rand::Rng as _;

use crate::domain::repository::{AccountRepository, AuditLogRepository, SessionRepository};
use crate::domain::types::{
    AuthSession, AuthUser, NewAuditEntry, NewCustomerSignup, SESSION_TOKEN_BYTES,
    SESSION_TTL_DAYS, SessionRecord,
};
use crate::error::{ApiError, FieldError};

/// Hash a password with Argon2id and a fresh random salt, off the async
/// runtime.
pub async fn hash_password(password: String) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| anyhow::anyhow!("hash password: {e}"))
    })
    .await
    .context("join password hash task")?
    .map_err(ApiError::Internal)
}

/// Verify a password against a stored hash, off the async runtime. A hash
/// that fails to parse is a server-side fault, not a login failure.
pub async fn verify_password(password: String, hashed: String) -> Result<bool, ApiError> {
    tokio::task::spawn_blocking(move || {
        let parsed =
            PasswordHash::new(&hashed).map_err(|e| anyhow::anyhow!("parse password hash: {e}"))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    })
    .await
    .context("join password verify task")?
    .map_err(ApiError::Internal)
}

/// 256 bits of entropy, hex-encoded. No collision check; at this entropy a
/// duplicate surfaces as a storage conflict, not a design concern.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn new_session(user_id: uuid::Uuid, user_agent: Option<String>) -> SessionRecord {
    let now = Utc::now();
    SessionRecord {
        id: generate_session_token(),
        user_id,
        expires_at: now + Duration::days(SESSION_TTL_DAYS),
        user_agent,
        created_at: now,
    }
}

// ── ValidateSession ──────────────────────────────────────────────────────────

/// The authentication gate: one storage read resolving the token, then the
/// expiry and active-flag checks. Expired or unknown tokens are
/// indistinguishable to the caller; a disabled user is reported separately.
pub struct ValidateSessionUseCase<S: SessionRepository> {
    pub sessions: S,
}

impl<S: SessionRepository> ValidateSessionUseCase<S> {
    pub async fn execute(&self, token: &str) -> Result<AuthSession, ApiError> {
        let auth = self
            .sessions
            .find_auth(token)
            .await?
            .ok_or(ApiError::Unauthorized)?;
        if !auth.session.is_valid() {
            return Err(ApiError::Unauthorized);
        }
        if !auth.user.is_active {
            return Err(ApiError::Forbidden);
        }
        Ok(auth)
    }
}

// ── EmployeeLogin ────────────────────────────────────────────────────────────

pub struct EmployeeLoginInput {
    pub phone_number: String,
    pub password: String,
    pub user_agent: Option<String>,
}

pub struct EmployeeLoginUseCase<A, S, L>
where
    A: AccountRepository,
    S: SessionRepository,
    L: AuditLogRepository,
{
    pub accounts: A,
    pub sessions: S,
    pub audit: L,
}

impl<A, S, L> EmployeeLoginUseCase<A, S, L>
where
    A: AccountRepository,
    S: SessionRepository,
    L: AuditLogRepository,
{
    pub async fn execute(
        &self,
        input: EmployeeLoginInput,
    ) -> Result<(SessionRecord, AuthUser), ApiError> {
        // 1. Resolve by phone; the account must carry an employee side.
        //    Unknown identifiers are audited without an actor.
        let account = self.accounts.find_by_phone(&input.phone_number).await?;
        let account = match account {
            Some(a) if a.user.employee.is_some() => a,
            _ => {
                self.audit
                    .append(&NewAuditEntry {
                        actor_id: None,
                        target_id: None,
                        target_type: None,
                        description: format!(
                            "Unauthorized login attempt for phone number {}",
                            input.phone_number
                        ),
                    })
                    .await?;
                return Err(ApiError::BadRequest("Invalid email or password".to_owned()));
            }
        };

        // 2. Password check.
        if !verify_password(input.password, account.hashed_password.clone()).await? {
            self.audit
                .append(&NewAuditEntry {
                    actor_id: None,
                    target_id: None,
                    target_type: None,
                    description: "Invalid login attempt".to_owned(),
                })
                .await?;
            return Err(ApiError::BadRequest("Invalid email or password".to_owned()));
        }

        // 3. Session + audit trail.
        let user = account.user;
        let session = new_session(user.id, input.user_agent);
        self.sessions.create(&session).await?;

        let employee_id = user.employee.as_ref().map(|e| e.id);
        self.audit
            .append(&NewAuditEntry {
                actor_id: employee_id,
                target_id: Some(session.id.clone()),
                target_type: Some("Session".to_owned()),
                description: format!("{} logged into the dashboard", user.name),
            })
            .await?;

        Ok((session, user))
    }
}

// ── CustomerLogin ────────────────────────────────────────────────────────────

pub struct CustomerLoginInput {
    pub email: String,
    pub password: String,
    pub user_agent: Option<String>,
}

pub struct CustomerLoginUseCase<A, S>
where
    A: AccountRepository,
    S: SessionRepository,
{
    pub accounts: A,
    pub sessions: S,
}

impl<A, S> CustomerLoginUseCase<A, S>
where
    A: AccountRepository,
    S: SessionRepository,
{
    pub async fn execute(
        &self,
        input: CustomerLoginInput,
    ) -> Result<(SessionRecord, AuthUser), ApiError> {
        let account = self.accounts.find_by_email(&input.email).await?;
        let account = match account {
            Some(a) if a.user.customer.is_some() => a,
            _ => return Err(ApiError::BadRequest("Invalid email or password".to_owned())),
        };

        if !verify_password(input.password, account.hashed_password.clone()).await? {
            return Err(ApiError::BadRequest("Invalid email or password".to_owned()));
        }

        let user = account.user;
        let session = new_session(user.id, input.user_agent);
        self.sessions.create(&session).await?;
        Ok((session, user))
    }
}

// ── CustomerSignup ───────────────────────────────────────────────────────────

pub struct CustomerSignupInput {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub user_agent: Option<String>,
}

pub struct CustomerSignupUseCase<A, S>
where
    A: AccountRepository,
    S: SessionRepository,
{
    pub accounts: A,
    pub sessions: S,
}

impl<A, S> CustomerSignupUseCase<A, S>
where
    A: AccountRepository,
    S: SessionRepository,
{
    pub async fn execute(
        &self,
        input: CustomerSignupInput,
    ) -> Result<(SessionRecord, AuthUser), ApiError> {
        validate_signup(&input)?;
        let hashed_password = hash_password(input.password).await?;
        let user = self
            .accounts
            .create_customer_account(&NewCustomerSignup {
                name: input.name,
                email: input.email,
                phone_number: input.phone_number,
                hashed_password,
            })
            .await?;

        let session = new_session(user.id, input.user_agent);
        self.sessions.create(&session).await?;
        Ok((session, user))
    }
}

fn validate_signup(input: &CustomerSignupInput) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    if input.name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required."));
    }
    if !input.email.contains('@') {
        errors.push(FieldError::new("email", "Invalid email address"));
    }
    if input.phone_number.trim().is_empty() {
        errors.push(FieldError::new("phoneNumber", "Phone number is required."));
    }
    if input.password.len() < 8 {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 8 characters",
        ));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<S, L>
where
    S: SessionRepository,
    L: AuditLogRepository,
{
    pub sessions: S,
    pub audit: L,
}

impl<S, L> LogoutUseCase<S, L>
where
    S: SessionRepository,
    L: AuditLogRepository,
{
    pub async fn execute(&self, auth: &AuthSession) -> Result<(), ApiError> {
        let deleted = self
            .sessions
            .delete_for_user(&auth.session.id, auth.user.id)
            .await?;
        if !deleted {
            return Err(ApiError::NotFound("Session"));
        }

        self.audit
            .append(&NewAuditEntry {
                actor_id: auth.user.employee.as_ref().map(|e| e.id),
                target_id: Some(auth.session.id.clone()),
                target_type: Some("Session".to_owned()),
                description: format!("{} logged out of the dashboard", auth.user.name),
            })
            .await?;
        Ok(())
    }
}

// ── ListSessions / DeleteSession ─────────────────────────────────────────────

pub struct ListSessionsUseCase<S: SessionRepository> {
    pub sessions: S,
}

impl<S: SessionRepository> ListSessionsUseCase<S> {
    pub async fn execute(&self, user_id: uuid::Uuid) -> Result<Vec<SessionRecord>, ApiError> {
        self.sessions.list_for_user(user_id).await
    }
}

pub struct DeleteSessionUseCase<S: SessionRepository> {
    pub sessions: S,
}

impl<S: SessionRepository> DeleteSessionUseCase<S> {
    /// Delete one of the caller's sessions by id. A session belonging to a
    /// different user is reported as missing, never touched.
    pub async fn execute(&self, session_id: &str, user_id: uuid::Uuid) -> Result<(), ApiError> {
        let deleted = self.sessions.delete_for_user(session_id, user_id).await?;
        if !deleted {
            return Err(ApiError::NotFound("Session"));
        }
        Ok(())
    }
}
