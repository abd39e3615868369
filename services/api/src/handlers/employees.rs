use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use skylift_domain::employee::EmployeeType;
use skylift_domain::pagination::PageRequest;
use uuid::Uuid;

use crate::domain::types::EmployeeRecord;
use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::handlers::{RoleDto, bad_multipart};
use crate::response::{self, Envelope, Paginated};
use crate::state::AppState;
use crate::usecase::employee::{
    CreateEmployeeInput, CreateEmployeeUseCase, GetEmployeeUseCase, ListEmployeesUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub employee_type: EmployeeType,
    pub is_online: bool,
    pub user: EmployeeUserDto,
    pub role: Option<RoleDto>,
    #[serde(serialize_with = "skylift_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "skylift_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUserDto {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub photo_url: Option<String>,
    pub is_active: bool,
    #[serde(serialize_with = "skylift_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<EmployeeRecord> for EmployeeDto {
    fn from(record: EmployeeRecord) -> Self {
        Self {
            id: record.id,
            employee_type: record.employee_type,
            is_online: record.is_online,
            user: EmployeeUserDto {
                id: record.user.id,
                name: record.user.name,
                email: record.user.email,
                phone_number: record.user.phone_number,
                photo_url: record.user.photo_url,
                is_active: record.user.is_active,
                created_at: record.user.created_at,
            },
            role: record.role.map(RoleDto::from),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

// ── GET /employees ───────────────────────────────────────────────────────────

pub async fn list_employees(
    CurrentUser(auth): CurrentUser,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Envelope<Paginated<EmployeeDto>>>, ApiError> {
    let usecase = ListEmployeesUseCase {
        employees: state.employee_repo(),
    };
    let (records, pagination) = usecase.execute(&auth.user, page).await?;
    Ok(response::success(
        "Success",
        Paginated {
            items: records.into_iter().map(EmployeeDto::from).collect(),
            pagination,
        },
    ))
}

// ── GET /employees/{id} ──────────────────────────────────────────────────────

pub async fn get_employee(
    CurrentUser(auth): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<EmployeeDto>>, ApiError> {
    let usecase = GetEmployeeUseCase {
        employees: state.employee_repo(),
    };
    let record = usecase.execute(&auth.user, id).await?;
    Ok(response::success("Success", record.into()))
}

// ── POST /employees ──────────────────────────────────────────────────────────

pub async fn create_employee(
    CurrentUser(auth): CurrentUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Envelope<EmployeeDto>>), ApiError> {
    let mut name = String::new();
    let mut email = String::new();
    let mut phone_number = String::new();
    let mut password = String::new();
    let mut employee_type = String::new();
    let mut role_id: Option<Uuid> = None;
    let mut photo = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let part = field.name().unwrap_or_default().to_owned();
        match part.as_str() {
            "photo" => photo = field.bytes().await.map_err(bad_multipart)?.to_vec(),
            "name" => name = field.text().await.map_err(bad_multipart)?,
            "email" => email = field.text().await.map_err(bad_multipart)?,
            "phoneNumber" => phone_number = field.text().await.map_err(bad_multipart)?,
            "password" => password = field.text().await.map_err(bad_multipart)?,
            "type" => employee_type = field.text().await.map_err(bad_multipart)?,
            "roleId" => {
                let raw = field.text().await.map_err(bad_multipart)?;
                role_id = Some(
                    raw.parse()
                        .map_err(|_| ApiError::invalid("roleId", "Invalid role id"))?,
                );
            }
            _ => {}
        }
    }
    let role_id = role_id.ok_or_else(|| ApiError::invalid("roleId", "Invalid role id"))?;

    let usecase = CreateEmployeeUseCase {
        employees: state.employee_repo(),
        roles: state.role_repo(),
        storage: state.storage.clone(),
    };
    let record = usecase
        .execute(
            &auth.user,
            CreateEmployeeInput {
                name,
                email,
                phone_number,
                password,
                employee_type,
                role_id,
                photo,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        response::success("Employee created successfully", record.into()),
    ))
}
