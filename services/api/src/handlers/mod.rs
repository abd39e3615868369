//! HTTP handlers, one module per resource group.

pub mod airports;
pub mod audit_logs;
pub mod auth;
pub mod bookings;
pub mod employees;
pub mod payments;
pub mod ride_options;
pub mod roles;
pub mod vehicles;

use axum::extract::multipart::MultipartError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use skylift_domain::employee::EmployeeType;
use skylift_domain::permission::Permission;
use uuid::Uuid;

use crate::domain::types::{AuthUser, Role};
use crate::error::ApiError;

pub(crate) fn bad_multipart(err: MultipartError) -> ApiError {
    ApiError::BadRequest(format!("Invalid multipart body: {err}"))
}

/// Wire form of a user with its attached account sides. Account sides are
/// omitted from the JSON entirely when absent.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub photo_url: Option<String>,
    pub is_active: bool,
    #[serde(serialize_with = "skylift_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<EmployeeSideDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerSideDto>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSideDto {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub employee_type: EmployeeType,
    pub is_online: bool,
    pub role: Option<RoleDto>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSideDto {
    pub id: Uuid,
    pub name: String,
    pub phone_number: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub permissions: Vec<Permission>,
    #[serde(serialize_with = "skylift_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "skylift_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Role> for RoleDto {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
            slug: role.slug,
            permissions: role.permissions,
            created_at: role.created_at,
            updated_at: role.updated_at,
        }
    }
}

impl From<AuthUser> for UserDto {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone_number: user.phone_number,
            photo_url: user.photo_url,
            is_active: user.is_active,
            created_at: user.created_at,
            employee: user.employee.map(|e| EmployeeSideDto {
                id: e.id,
                employee_type: e.employee_type,
                is_online: e.is_online,
                role: e.role.map(RoleDto::from),
            }),
            customer: user.customer.map(|c| CustomerSideDto {
                id: c.id,
                name: c.name,
                phone_number: c.phone_number,
            }),
        }
    }
}
