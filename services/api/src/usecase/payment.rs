use skylift_domain::payment::PaymentStatus;
use uuid::Uuid;

use crate::domain::repository::{PaymentGateway, PaymentRepository};
use crate::domain::types::Payment;
use crate::error::ApiError;

/// Gateway redirect target. The payment id in the URL is the `CompanyRef` we
/// sent with the token request; the token in the query string is what gets
/// verified. Gateways redeliver, so the whole flow is idempotent.
pub struct ReconcilePaymentUseCase<P, G>
where
    P: PaymentRepository,
    G: PaymentGateway,
{
    pub payments: P,
    pub gateway: G,
}

impl<P, G> ReconcilePaymentUseCase<P, G>
where
    P: PaymentRepository,
    G: PaymentGateway,
{
    pub async fn execute(
        &self,
        payment_id: Uuid,
        transaction_token: &str,
    ) -> Result<Payment, ApiError> {
        // 1. The payment must exist.
        let mut payment = self
            .payments
            .find_by_id(payment_id)
            .await?
            .ok_or(ApiError::NotFound("Payment"))?;

        // 2. Already settled: report the current state without touching the
        //    gateway again.
        if payment.status != PaymentStatus::Pending {
            return Ok(payment);
        }

        // 3. The gateway's verdict is authoritative; the redirect itself
        //    proves nothing.
        let verification = self.gateway.verify_token(transaction_token).await?;
        let status = if verification.is_approved() {
            PaymentStatus::Confirmed
        } else {
            PaymentStatus::Failed
        };

        // 4. Guarded settle. Losing the race to a concurrent redelivery means
        //    the row already carries a final state; return that one.
        let settled = self
            .payments
            .settle(payment.id, status, transaction_token)
            .await?;
        if !settled {
            return self
                .payments
                .find_by_id(payment_id)
                .await?
                .ok_or(ApiError::NotFound("Payment"));
        }

        payment.status = status;
        payment.gateway_reference = Some(transaction_token.to_owned());
        Ok(payment)
    }
}
