use skylift_domain::permission::Permission;

use crate::domain::types::AuthUser;
use crate::error::ApiError;

pub mod airport;
pub mod audit;
pub mod booking;
pub mod employee;
pub mod payment;
pub mod ride_option;
pub mod role;
pub mod session;
pub mod vehicle;

/// Account-type gate, then permission gate. A caller without an employee
/// account gets 401 (wrong kind of account); an employee whose role lacks the
/// permission gets 403.
pub(crate) fn require_permission(
    actor: &AuthUser,
    permission: Permission,
) -> Result<(), ApiError> {
    if actor.employee.is_none() {
        return Err(ApiError::Unauthorized);
    }
    if !actor.has_permission(permission) {
        return Err(ApiError::Forbidden);
    }
    Ok(())
}
