use skylift_api::error::ApiError;
use skylift_api::usecase::payment::ReconcilePaymentUseCase;
use skylift_domain::payment::PaymentStatus;
use skylift_testing::fixture::uuid_n;

use crate::helpers::{MockGateway, MockPaymentRepo, pending_payment};

// ── ReconcilePaymentUseCase ──────────────────────────────────────────────────

#[tokio::test]
async fn should_confirm_a_pending_payment_on_an_approved_verdict() {
    let payment = pending_payment(uuid_n(9));
    let payment_id = payment.id;
    let payments = MockPaymentRepo::new(vec![payment]);
    let stored = payments.payments_handle();
    let gateway = MockGateway::approving("3F2A0-TOKEN");
    let verified = gateway.verified_tokens_handle();
    let usecase = ReconcilePaymentUseCase { payments, gateway };

    let settled = usecase.execute(payment_id, "A1B2C3-TRANS").await.unwrap();

    assert_eq!(settled.status, PaymentStatus::Confirmed);
    assert_eq!(settled.gateway_reference.as_deref(), Some("A1B2C3-TRANS"));
    assert_eq!(verified.lock().unwrap().as_slice(), ["A1B2C3-TRANS"]);
    assert_eq!(stored.lock().unwrap()[0].status, PaymentStatus::Confirmed);
}

#[tokio::test]
async fn should_fail_a_pending_payment_on_a_declined_verdict() {
    let payment = pending_payment(uuid_n(9));
    let payment_id = payment.id;
    let payments = MockPaymentRepo::new(vec![payment]);
    let stored = payments.payments_handle();
    let usecase = ReconcilePaymentUseCase {
        payments,
        gateway: MockGateway::declining("901"),
    };

    let settled = usecase.execute(payment_id, "A1B2C3-TRANS").await.unwrap();

    assert_eq!(settled.status, PaymentStatus::Failed);
    assert_eq!(stored.lock().unwrap()[0].status, PaymentStatus::Failed);
}

#[tokio::test]
async fn should_keep_the_first_verdict_on_a_redelivered_callback() {
    let payment = pending_payment(uuid_n(9));
    let payment_id = payment.id;
    let payments = MockPaymentRepo::new(vec![payment]);
    let gateway = MockGateway::approving("3F2A0-TOKEN");
    let verified = gateway.verified_tokens_handle();
    let usecase = ReconcilePaymentUseCase { payments, gateway };

    let first = usecase.execute(payment_id, "A1B2C3-TRANS").await.unwrap();
    assert_eq!(first.status, PaymentStatus::Confirmed);

    // The redelivery finds the payment settled and never calls out again.
    let second = usecase.execute(payment_id, "A1B2C3-TRANS").await.unwrap();
    assert_eq!(second.status, PaymentStatus::Confirmed);
    assert_eq!(verified.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_report_the_stored_state_after_losing_a_settle_race() {
    let payment = pending_payment(uuid_n(9));
    let payment_id = payment.id;
    let mut payments = MockPaymentRepo::new(vec![payment]);
    payments.stale = true;
    let usecase = ReconcilePaymentUseCase {
        payments,
        gateway: MockGateway::declining("901"),
    };

    let settled = usecase.execute(payment_id, "LATE-TOKEN").await.unwrap();

    // The rival delivery's confirmed outcome wins over this declined one.
    assert_eq!(settled.status, PaymentStatus::Confirmed);
    assert_eq!(settled.gateway_reference.as_deref(), Some("RIVAL-TOKEN"));
}

#[tokio::test]
async fn should_return_not_found_for_an_unknown_payment() {
    let usecase = ReconcilePaymentUseCase {
        payments: MockPaymentRepo::empty(),
        gateway: MockGateway::approving("3F2A0-TOKEN"),
    };

    let result = usecase.execute(uuid_n(33), "A1B2C3-TRANS").await;

    assert!(
        matches!(result, Err(ApiError::NotFound("Payment"))),
        "expected NotFound, got {result:?}"
    );
}
