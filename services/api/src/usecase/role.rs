use skylift_domain::pagination::{PageInfo, PageRequest};
use skylift_domain::permission::{self, Permission};

use crate::domain::repository::RoleRepository;
use crate::domain::types::{AuthUser, NewRole, Role, RoleUpdate};
use crate::error::{ApiError, FieldError};
use crate::usecase::require_permission;

// ── ListRoles ────────────────────────────────────────────────────────────────

pub struct ListRolesUseCase<R: RoleRepository> {
    pub roles: R,
}

impl<R: RoleRepository> ListRolesUseCase<R> {
    pub async fn execute(
        &self,
        actor: &AuthUser,
        page: PageRequest,
    ) -> Result<(Vec<Role>, PageInfo), ApiError> {
        require_permission(actor, Permission::ViewEmployeeRole)?;
        let page = page.validated()?;
        let (roles, total) = self.roles.list(page).await?;
        Ok((roles, PageInfo::new(total, page)))
    }
}

// ── GetRole ──────────────────────────────────────────────────────────────────

pub struct GetRoleUseCase<R: RoleRepository> {
    pub roles: R,
}

impl<R: RoleRepository> GetRoleUseCase<R> {
    pub async fn execute(&self, actor: &AuthUser, slug: &str) -> Result<Role, ApiError> {
        require_permission(actor, Permission::ViewEmployeeRole)?;
        self.roles
            .find_by_slug(slug)
            .await?
            .ok_or(ApiError::NotFound("Role"))
    }
}

// ── CreateRole ───────────────────────────────────────────────────────────────

pub struct RoleInput {
    pub name: String,
    pub permissions: Vec<String>,
}

pub struct CreateRoleUseCase<R: RoleRepository> {
    pub roles: R,
}

impl<R: RoleRepository> CreateRoleUseCase<R> {
    pub async fn execute(&self, actor: &AuthUser, input: RoleInput) -> Result<Role, ApiError> {
        require_permission(actor, Permission::CreateEmployeeRole)?;

        // 1. Validate the name and parse the permission strings.
        let (name, permissions) = validate(&input)?;

        // 2. The slug is derived from the name and never changes afterwards.
        let slug = slug::slugify(&name);

        // 3. Insert; a duplicate name or slug surfaces as Conflict.
        self.roles
            .create(&NewRole {
                name,
                slug,
                permissions,
            })
            .await
    }
}

// ── UpdateRole ───────────────────────────────────────────────────────────────

pub struct UpdateRoleUseCase<R: RoleRepository> {
    pub roles: R,
}

impl<R: RoleRepository> UpdateRoleUseCase<R> {
    /// Full replacement of name and permissions. The slug stays what it was
    /// at creation, so stored links to the role survive a rename.
    pub async fn execute(
        &self,
        actor: &AuthUser,
        slug: &str,
        input: RoleInput,
    ) -> Result<Role, ApiError> {
        require_permission(actor, Permission::EditEmployeeRole)?;

        let (name, permissions) = validate(&input)?;

        self.roles
            .update(slug, &RoleUpdate { name, permissions })
            .await?
            .ok_or(ApiError::NotFound("Role"))
    }
}

// ── DeleteRole ───────────────────────────────────────────────────────────────

pub struct DeleteRoleUseCase<R: RoleRepository> {
    pub roles: R,
}

impl<R: RoleRepository> DeleteRoleUseCase<R> {
    pub async fn execute(&self, actor: &AuthUser, slug: &str) -> Result<(), ApiError> {
        require_permission(actor, Permission::DeleteEmployeeRole)?;
        if !self.roles.delete(slug).await? {
            return Err(ApiError::NotFound("Role"));
        }
        Ok(())
    }
}

fn validate(input: &RoleInput) -> Result<(String, Vec<Permission>), ApiError> {
    let mut errors = Vec::new();
    let name = input.name.trim();
    if name.is_empty() {
        errors.push(FieldError::new("name", "Name is required."));
    }
    if input.permissions.is_empty() {
        errors.push(FieldError::new("permissions", "Add at least one permission"));
    }
    let permissions = match permission::parse_permissions(&input.permissions) {
        Ok(permissions) => permissions,
        Err(err) => {
            errors.push(FieldError::new("permissions", err.to_string()));
            Vec::new()
        }
    };
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    Ok((name.to_owned(), permissions))
}
