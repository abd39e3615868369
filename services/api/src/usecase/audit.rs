use chrono::NaiveDate;
use skylift_domain::permission::Permission;

use crate::domain::repository::AuditLogRepository;
use crate::domain::types::{AuditEntry, AuthUser};
use crate::error::ApiError;
use crate::usecase::require_permission;

pub struct ListAuditLogsUseCase<L: AuditLogRepository> {
    pub audit: L,
}

impl<L: AuditLogRepository> ListAuditLogsUseCase<L> {
    /// Entries created on the given UTC day, newest first.
    pub async fn execute(
        &self,
        actor: &AuthUser,
        day: NaiveDate,
    ) -> Result<Vec<AuditEntry>, ApiError> {
        require_permission(actor, Permission::ViewAuditLogs)?;
        self.audit.list_for_day(day).await
    }
}
