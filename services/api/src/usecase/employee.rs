use skylift_domain::employee::EmployeeType;
use skylift_domain::pagination::{PageInfo, PageRequest};
use skylift_domain::permission::Permission;
use uuid::Uuid;

use crate::domain::repository::{EmployeeRepository, ObjectStorage, RoleRepository};
use crate::domain::types::{AuthUser, EmployeeRecord, NewEmployee};
use crate::error::{ApiError, FieldError};
use crate::usecase::require_permission;
use crate::usecase::session::hash_password;

/// Bucket folder for employee profile photos.
const PHOTO_FOLDER: &str = "user-photos";

// ── ListEmployees ────────────────────────────────────────────────────────────

pub struct ListEmployeesUseCase<E: EmployeeRepository> {
    pub employees: E,
}

impl<E: EmployeeRepository> ListEmployeesUseCase<E> {
    pub async fn execute(
        &self,
        actor: &AuthUser,
        page: PageRequest,
    ) -> Result<(Vec<EmployeeRecord>, PageInfo), ApiError> {
        require_permission(actor, Permission::ViewEmployee)?;
        let page = page.validated()?;
        let (records, total) = self.employees.list(page).await?;
        Ok((records, PageInfo::new(total, page)))
    }
}

// ── GetEmployee ──────────────────────────────────────────────────────────────

pub struct GetEmployeeUseCase<E: EmployeeRepository> {
    pub employees: E,
}

impl<E: EmployeeRepository> GetEmployeeUseCase<E> {
    pub async fn execute(&self, actor: &AuthUser, id: Uuid) -> Result<EmployeeRecord, ApiError> {
        require_permission(actor, Permission::ViewEmployee)?;
        self.employees
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("Employee"))
    }
}

// ── CreateEmployee ───────────────────────────────────────────────────────────

pub struct CreateEmployeeInput {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub employee_type: String,
    pub role_id: Uuid,
    pub photo: Vec<u8>,
}

pub struct CreateEmployeeUseCase<E, R, O>
where
    E: EmployeeRepository,
    R: RoleRepository,
    O: ObjectStorage,
{
    pub employees: E,
    pub roles: R,
    pub storage: O,
}

impl<E, R, O> CreateEmployeeUseCase<E, R, O>
where
    E: EmployeeRepository,
    R: RoleRepository,
    O: ObjectStorage,
{
    pub async fn execute(
        &self,
        actor: &AuthUser,
        input: CreateEmployeeInput,
    ) -> Result<EmployeeRecord, ApiError> {
        require_permission(actor, Permission::CreateEmployee)?;
        if input.photo.is_empty() {
            return Err(ApiError::BadRequest(
                "No profile picture uploaded".to_owned(),
            ));
        }

        let employee_type = validate(&input)?;

        // Role must exist before anything is written or uploaded.
        if self.roles.find_by_id(input.role_id).await?.is_none() {
            return Err(ApiError::NotFound("Role"));
        }

        // Photo goes to object storage first; a failed upload leaves no rows.
        let photo_url = self.storage.upload_image(PHOTO_FOLDER, input.photo).await?;
        let hashed_password = hash_password(input.password).await?;

        self.employees
            .create(&NewEmployee {
                name: input.name,
                email: input.email,
                phone_number: input.phone_number,
                hashed_password,
                photo_url,
                employee_type,
                role_id: input.role_id,
            })
            .await
    }
}

fn validate(input: &CreateEmployeeInput) -> Result<EmployeeType, ApiError> {
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
    let employee_type = EmployeeType::from_str(&input.employee_type);
    if employee_type.is_none() {
        errors.push(FieldError::new(
            "type",
            "Expected one of admin, driver, rider",
        ));
    }
    match employee_type {
        Some(t) if errors.is_empty() => Ok(t),
        _ => Err(ApiError::Validation(errors)),
    }
}
