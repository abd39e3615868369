use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use skylift_domain::pagination::PageRequest;

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::handlers::RoleDto;
use crate::response::{self, Envelope, Paginated};
use crate::state::AppState;
use crate::usecase::role::{
    CreateRoleUseCase, DeleteRoleUseCase, GetRoleUseCase, ListRolesUseCase, RoleInput,
    UpdateRoleUseCase,
};

#[derive(Deserialize)]
pub struct RoleRequest {
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

// ── GET /employees/roles ─────────────────────────────────────────────────────

pub async fn list_roles(
    CurrentUser(auth): CurrentUser,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Envelope<Paginated<RoleDto>>>, ApiError> {
    let usecase = ListRolesUseCase {
        roles: state.role_repo(),
    };
    let (roles, pagination) = usecase.execute(&auth.user, page).await?;
    Ok(response::success(
        "Success",
        Paginated {
            items: roles.into_iter().map(RoleDto::from).collect(),
            pagination,
        },
    ))
}

// ── GET /employees/roles/{slug} ──────────────────────────────────────────────

pub async fn get_role(
    CurrentUser(auth): CurrentUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Envelope<RoleDto>>, ApiError> {
    let usecase = GetRoleUseCase {
        roles: state.role_repo(),
    };
    let role = usecase.execute(&auth.user, &slug).await?;
    Ok(response::success("Success", role.into()))
}

// ── POST /employees/roles ────────────────────────────────────────────────────

pub async fn create_role(
    CurrentUser(auth): CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<RoleRequest>,
) -> Result<(StatusCode, Json<Envelope<RoleDto>>), ApiError> {
    let usecase = CreateRoleUseCase {
        roles: state.role_repo(),
    };
    let role = usecase
        .execute(
            &auth.user,
            RoleInput {
                name: body.name,
                permissions: body.permissions,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        response::success("Employee role created successfully", role.into()),
    ))
}

// ── PUT /employees/roles/{slug} ──────────────────────────────────────────────

pub async fn update_role(
    CurrentUser(auth): CurrentUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<RoleRequest>,
) -> Result<Json<Envelope<RoleDto>>, ApiError> {
    let usecase = UpdateRoleUseCase {
        roles: state.role_repo(),
    };
    let role = usecase
        .execute(
            &auth.user,
            &slug,
            RoleInput {
                name: body.name,
                permissions: body.permissions,
            },
        )
        .await?;
    Ok(response::success("Role updated successfully", role.into()))
}

// ── DELETE /employees/roles/{slug} ───────────────────────────────────────────

pub async fn delete_role(
    CurrentUser(auth): CurrentUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let usecase = DeleteRoleUseCase {
        roles: state.role_repo(),
    };
    usecase.execute(&auth.user, &slug).await?;
    Ok(response::message_only("Role deleted successfully"))
}
