use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skylift_domain::payment::{PaymentMethod, PaymentStatus};
use uuid::Uuid;

use crate::domain::types::Payment;
use crate::error::ApiError;
use crate::response::{self, Envelope};
use crate::state::AppState;
use crate::usecase::payment::ReconcilePaymentUseCase;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub amount: f64,
    pub method: Option<PaymentMethod>,
    pub status: PaymentStatus,
    pub gateway_reference: Option<String>,
    #[serde(serialize_with = "skylift_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "skylift_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Payment> for PaymentDto {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            booking_id: payment.booking_id,
            amount: payment.amount,
            method: payment.method,
            status: payment.status,
            gateway_reference: payment.gateway_reference,
            created_at: payment.created_at,
            updated_at: payment.updated_at,
        }
    }
}

// ── GET /payments/{payment_id}/callback ──────────────────────────────────────

#[derive(Deserialize)]
pub struct CallbackQuery {
    #[serde(rename = "TransactionToken")]
    pub transaction_token: String,
}

/// Unauthenticated: the caller is the gateway's browser redirect. The
/// payment state comes from verifyToken, never from the query string alone.
pub async fn payment_callback(
    State(state): State<AppState>,
    Path(payment_id): Path<Uuid>,
    Query(query): Query<CallbackQuery>,
) -> Result<Json<Envelope<PaymentDto>>, ApiError> {
    let usecase = ReconcilePaymentUseCase {
        payments: state.payment_repo(),
        gateway: state.gateway.clone(),
    };
    let payment = usecase.execute(payment_id, &query.transaction_token).await?;
    let message = match payment.status {
        PaymentStatus::Confirmed => "Payment confirmed",
        PaymentStatus::Failed => "Payment failed",
        PaymentStatus::Pending => "Payment pending",
    };
    Ok(response::success(message, payment.into()))
}
