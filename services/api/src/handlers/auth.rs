use axum::{Json, extract::Path, extract::State, http::StatusCode};
use axum_extra::TypedHeader;
use axum_extra::headers::UserAgent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::handlers::UserDto;
use crate::response::{self, Envelope};
use crate::state::AppState;
use crate::usecase::session::{
    CustomerLoginInput, CustomerLoginUseCase, CustomerSignupInput, CustomerSignupUseCase,
    DeleteSessionUseCase, EmployeeLoginInput, EmployeeLoginUseCase, ListSessionsUseCase,
    LogoutUseCase,
};

/// Login and signup payload: the session token plus the resolved user.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub session_id: String,
    pub user: UserDto,
}

fn agent_string(user_agent: Option<TypedHeader<UserAgent>>) -> Option<String> {
    user_agent.map(|TypedHeader(ua)| ua.as_str().to_owned())
}

// ── POST /auth/employees/login ───────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeLoginRequest {
    pub phone_number: String,
    pub password: String,
}

pub async fn employee_login(
    State(state): State<AppState>,
    user_agent: Option<TypedHeader<UserAgent>>,
    Json(body): Json<EmployeeLoginRequest>,
) -> Result<Json<Envelope<SessionPayload>>, ApiError> {
    let usecase = EmployeeLoginUseCase {
        accounts: state.account_repo(),
        sessions: state.session_repo(),
        audit: state.audit_repo(),
    };
    let (session, user) = usecase
        .execute(EmployeeLoginInput {
            phone_number: body.phone_number,
            password: body.password,
            user_agent: agent_string(user_agent),
        })
        .await?;
    Ok(response::success(
        "Login successful",
        SessionPayload {
            session_id: session.id,
            user: user.into(),
        },
    ))
}

// ── GET /auth/employees ──────────────────────────────────────────────────────

pub async fn employee_profile(
    CurrentUser(auth): CurrentUser,
) -> Result<Json<Envelope<UserDto>>, ApiError> {
    if auth.user.employee.is_none() {
        return Err(ApiError::Unauthorized);
    }
    Ok(response::success("Success", auth.user.into()))
}

// ── POST /auth/customers/signup ──────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSignupRequest {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
}

pub async fn customer_signup(
    State(state): State<AppState>,
    user_agent: Option<TypedHeader<UserAgent>>,
    Json(body): Json<CustomerSignupRequest>,
) -> Result<(StatusCode, Json<Envelope<SessionPayload>>), ApiError> {
    let usecase = CustomerSignupUseCase {
        accounts: state.account_repo(),
        sessions: state.session_repo(),
    };
    let (session, user) = usecase
        .execute(CustomerSignupInput {
            name: body.name,
            email: body.email,
            phone_number: body.phone_number,
            password: body.password,
            user_agent: agent_string(user_agent),
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        response::success(
            "Signup successful",
            SessionPayload {
                session_id: session.id,
                user: user.into(),
            },
        ),
    ))
}

// ── POST /auth/customers/login ───────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerLoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn customer_login(
    State(state): State<AppState>,
    user_agent: Option<TypedHeader<UserAgent>>,
    Json(body): Json<CustomerLoginRequest>,
) -> Result<Json<Envelope<SessionPayload>>, ApiError> {
    let usecase = CustomerLoginUseCase {
        accounts: state.account_repo(),
        sessions: state.session_repo(),
    };
    let (session, user) = usecase
        .execute(CustomerLoginInput {
            email: body.email,
            password: body.password,
            user_agent: agent_string(user_agent),
        })
        .await?;
    Ok(response::success(
        "Login successful",
        SessionPayload {
            session_id: session.id,
            user: user.into(),
        },
    ))
}

// ── GET /auth/customers ──────────────────────────────────────────────────────

pub async fn customer_profile(
    CurrentUser(auth): CurrentUser,
) -> Result<Json<Envelope<UserDto>>, ApiError> {
    if auth.user.customer.is_none() {
        return Err(ApiError::Unauthorized);
    }
    Ok(response::success("Success", auth.user.into()))
}

// ── GET /auth/sessions ───────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub id: String,
    pub user_agent: Option<String>,
    pub is_current: bool,
    #[serde(serialize_with = "skylift_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "skylift_core::serde::to_rfc3339_ms")]
    pub expires_at: DateTime<Utc>,
}

pub async fn list_sessions(
    CurrentUser(auth): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<SessionDto>>>, ApiError> {
    let usecase = ListSessionsUseCase {
        sessions: state.session_repo(),
    };
    let sessions = usecase.execute(auth.user.id).await?;
    let sessions = sessions
        .into_iter()
        .map(|s| {
            let is_current = s.id == auth.session.id;
            SessionDto {
                id: s.id,
                user_agent: s.user_agent,
                is_current,
                created_at: s.created_at,
                expires_at: s.expires_at,
            }
        })
        .collect();
    Ok(response::success("Success", sessions))
}

// ── DELETE /auth/sessions/{session_id} ───────────────────────────────────────

pub async fn delete_session(
    CurrentUser(auth): CurrentUser,
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let usecase = DeleteSessionUseCase {
        sessions: state.session_repo(),
    };
    usecase.execute(&session_id, auth.user.id).await?;
    Ok(response::message_only("Session terminated"))
}

// ── DELETE /auth/logout ──────────────────────────────────────────────────────

pub async fn logout(
    CurrentUser(auth): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let usecase = LogoutUseCase {
        sessions: state.session_repo(),
        audit: state.audit_repo(),
    };
    usecase.execute(&auth).await?;
    Ok(response::message_only("Logged out successfully"))
}
