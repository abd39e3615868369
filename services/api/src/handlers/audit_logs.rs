use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::AuditEntry;
use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::response::{self, Envelope};
use crate::state::AppState;
use crate::usecase::audit::ListAuditLogsUseCase;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntryDto {
    pub id: Uuid,
    pub actor_id: Option<Uuid>,
    pub target_id: Option<String>,
    pub target_type: Option<String>,
    pub description: String,
    #[serde(serialize_with = "skylift_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<AuditEntry> for AuditEntryDto {
    fn from(entry: AuditEntry) -> Self {
        Self {
            id: entry.id,
            actor_id: entry.actor_id,
            target_id: entry.target_id,
            target_type: entry.target_type,
            description: entry.description,
            created_at: entry.created_at,
        }
    }
}

// ── GET /audit-logs ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AuditQuery {
    pub date: String,
}

pub async fn list_audit_logs(
    State(state): State<AppState>,
    CurrentUser(auth): CurrentUser,
    Query(query): Query<AuditQuery>,
) -> Result<Json<Envelope<Vec<AuditEntryDto>>>, ApiError> {
    let day = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d")
        .map_err(|_| ApiError::invalid("date", "Expected a YYYY-MM-DD date"))?;
    let usecase = ListAuditLogsUseCase {
        audit: state.audit_repo(),
    };
    let entries = usecase.execute(&auth.user, day).await?;
    Ok(response::success(
        "Success",
        entries.into_iter().map(Into::into).collect(),
    ))
}
