use skylift_api::error::ApiError;
use skylift_api::usecase::booking::{
    CreateBookingInput, CreateBookingUseCase, ListBookingsUseCase, TransitionBookingUseCase,
};
use skylift_domain::booking::BookingStatus;
use skylift_domain::currency::Currency;
use skylift_domain::employee::EmployeeType;
use skylift_domain::payment::PaymentStatus;
use skylift_domain::permission::Permission;
use skylift_testing::fixture::uuid_n;

use crate::helpers::{
    MockAuditRepo, MockBookingRepo, MockGateway, booking_for, customer_user, employee_user,
};

fn create_input() -> CreateBookingInput {
    CreateBookingInput {
        airport_id: uuid_n(10),
        ride_option_id: uuid_n(11),
        fare: 120_000.0,
        currency: Currency::Ugx,
        drop_off_latitude: 0.31,
        drop_off_longitude: 32.58,
        drop_off_name: "Kololo".to_owned(),
        note: Some("Call on arrival".to_owned()),
    }
}

// ── CreateBookingUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_a_booking_with_a_pending_payment_and_token() {
    let actor = customer_user(uuid_n(7));
    let bookings = MockBookingRepo::empty();
    let stored_payments = bookings.payments_handle();
    let gateway = MockGateway::approving("3F2A0-TOKEN");
    let token_requests = gateway.token_requests_handle();
    let audit = MockAuditRepo::empty();
    let entries = audit.appended_handle();

    let usecase = CreateBookingUseCase {
        bookings,
        gateway,
        audit,
        redirect_base_url: "https://api.skylift.test/".to_owned(),
    };
    let output = usecase.execute(&actor, create_input()).await.unwrap();

    assert_eq!(output.booking.status, BookingStatus::PendingPayment);
    assert_eq!(output.booking.customer_id, uuid_n(7));
    assert_eq!(output.payment.status, PaymentStatus::Pending);
    assert_eq!(output.payment.amount, output.booking.fare);
    assert_eq!(output.payment_token.as_deref(), Some("3F2A0-TOKEN"));
    assert!(output.payment_token_error.is_none());
    assert_eq!(stored_payments.lock().unwrap().len(), 1);

    // The gateway was asked for a token against this payment, with the
    // callback pointing at the payment's own reconciliation URL.
    let requests = token_requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].company_ref, output.payment.id);
    let callback = format!(
        "https://api.skylift.test/payments/{}/callback",
        output.payment.id
    );
    assert_eq!(requests[0].redirect_url, callback);
    assert_eq!(requests[0].back_url, callback);

    let entries = entries.lock().unwrap();
    assert_eq!(
        entries[0].description,
        format!("Booking {} created", output.booking.id)
    );
    assert_eq!(entries[0].actor_id, None);
}

#[tokio::test]
async fn should_keep_the_booking_when_the_token_request_fails() {
    let actor = customer_user(uuid_n(7));
    let bookings = MockBookingRepo::empty();
    let stored_bookings = bookings.bookings_handle();
    let usecase = CreateBookingUseCase {
        bookings,
        gateway: MockGateway::timing_out(),
        audit: MockAuditRepo::empty(),
        redirect_base_url: "https://api.skylift.test".to_owned(),
    };

    let output = usecase.execute(&actor, create_input()).await.unwrap();

    assert!(output.payment_token.is_none());
    assert_eq!(
        output.payment_token_error,
        Some("Payment token request failed")
    );
    assert_eq!(stored_bookings.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_refuse_bookings_from_employee_accounts() {
    let actor = employee_user(EmployeeType::Admin, Permission::ALL);
    let usecase = CreateBookingUseCase {
        bookings: MockBookingRepo::empty(),
        gateway: MockGateway::approving("3F2A0-TOKEN"),
        audit: MockAuditRepo::empty(),
        redirect_base_url: "https://api.skylift.test".to_owned(),
    };

    let result = usecase.execute(&actor, create_input()).await;

    assert!(
        matches!(result, Err(ApiError::Unauthorized)),
        "expected Unauthorized, got {result:?}"
    );
}

#[tokio::test]
async fn should_abort_when_a_reference_is_missing() {
    let actor = customer_user(uuid_n(7));
    let mut bookings = MockBookingRepo::empty();
    bookings.missing_reference = true;
    let gateway = MockGateway::approving("3F2A0-TOKEN");
    let token_requests = gateway.token_requests_handle();
    let audit = MockAuditRepo::empty();
    let entries = audit.appended_handle();
    let usecase = CreateBookingUseCase {
        bookings,
        gateway,
        audit,
        redirect_base_url: "https://api.skylift.test".to_owned(),
    };

    let result = usecase.execute(&actor, create_input()).await;

    assert!(
        matches!(result, Err(ApiError::NotFound("Airport"))),
        "expected NotFound, got {result:?}"
    );
    assert!(token_requests.lock().unwrap().is_empty());
    assert!(entries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_an_out_of_range_drop_off() {
    let actor = customer_user(uuid_n(7));
    let usecase = CreateBookingUseCase {
        bookings: MockBookingRepo::empty(),
        gateway: MockGateway::approving("3F2A0-TOKEN"),
        audit: MockAuditRepo::empty(),
        redirect_base_url: "https://api.skylift.test".to_owned(),
    };
    let input = CreateBookingInput {
        drop_off_latitude: 123.0,
        ..create_input()
    };

    let result = usecase.execute(&actor, input).await;

    assert!(
        matches!(result, Err(ApiError::Validation(ref e)) if e[0].field == "dropOffLatitude"),
        "expected latitude validation error, got {result:?}"
    );
}

// ── ListBookingsUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_scope_listings_to_the_calling_customer() {
    let bookings = MockBookingRepo::new(vec![
        booking_for(uuid_n(7), BookingStatus::Accepted),
        booking_for(uuid_n(8), BookingStatus::Completed),
    ]);
    let usecase = ListBookingsUseCase { bookings };

    let own = usecase.execute(&customer_user(uuid_n(7))).await.unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].customer_id, uuid_n(7));

    let all = usecase
        .execute(&employee_user(
            EmployeeType::Admin,
            &[Permission::ViewCustomer],
        ))
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let result = usecase
        .execute(&employee_user(EmployeeType::Driver, &[]))
        .await;
    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

// ── TransitionBookingUseCase ─────────────────────────────────────────────────

#[tokio::test]
async fn should_walk_a_booking_along_the_forward_path() {
    let booking = booking_for(uuid_n(7), BookingStatus::Accepted);
    let booking_id = booking.id;
    let driver = employee_user(EmployeeType::Driver, &[]);
    let audit = MockAuditRepo::empty();
    let entries = audit.appended_handle();
    let usecase = TransitionBookingUseCase {
        bookings: MockBookingRepo::new(vec![booking]),
        audit,
    };

    for target in [
        BookingStatus::DriverEnRouteToPickup,
        BookingStatus::DriverArrivedAtPickup,
        BookingStatus::InProgress,
        BookingStatus::Completed,
    ] {
        let moved = usecase.execute(&driver, booking_id, target).await.unwrap();
        assert_eq!(moved.status, target);
    }

    let entries = entries.lock().unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(
        entries[3].description,
        format!("Booking {booking_id} moved to completed")
    );
    assert_eq!(entries[3].actor_id, Some(uuid_n(3)));
}

#[tokio::test]
async fn should_reject_skipping_states() {
    let booking = booking_for(uuid_n(7), BookingStatus::PendingPayment);
    let booking_id = booking.id;
    let admin = employee_user(EmployeeType::Admin, &[]);
    let usecase = TransitionBookingUseCase {
        bookings: MockBookingRepo::new(vec![booking]),
        audit: MockAuditRepo::empty(),
    };

    let result = usecase
        .execute(&admin, booking_id, BookingStatus::InProgress)
        .await;

    assert!(
        matches!(result, Err(ApiError::Validation(ref e)) if e[0].field == "status"),
        "expected status validation error, got {result:?}"
    );
}

#[tokio::test]
async fn should_let_a_customer_cancel_only_their_own_booking() {
    let own = booking_for(uuid_n(7), BookingStatus::Accepted);
    let own_id = own.id;
    let foreign = booking_for(uuid_n(8), BookingStatus::Accepted);
    let foreign_id = foreign.id;
    let usecase = TransitionBookingUseCase {
        bookings: MockBookingRepo::new(vec![own, foreign]),
        audit: MockAuditRepo::empty(),
    };
    let actor = customer_user(uuid_n(7));

    let cancelled = usecase
        .execute(&actor, own_id, BookingStatus::CancelledByCustomer)
        .await
        .unwrap();
    assert_eq!(cancelled.status, BookingStatus::CancelledByCustomer);

    let result = usecase
        .execute(&actor, foreign_id, BookingStatus::CancelledByCustomer)
        .await;
    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_conflict_when_the_guarded_update_loses_a_race() {
    let booking = booking_for(uuid_n(7), BookingStatus::Accepted);
    let booking_id = booking.id;
    let mut bookings = MockBookingRepo::new(vec![booking]);
    bookings.stale = true;
    let audit = MockAuditRepo::empty();
    let entries = audit.appended_handle();
    let usecase = TransitionBookingUseCase { bookings, audit };

    let result = usecase
        .execute(
            &employee_user(EmployeeType::Admin, &[]),
            booking_id,
            BookingStatus::DriverEnRouteToPickup,
        )
        .await;

    assert!(
        matches!(result, Err(ApiError::Conflict(_))),
        "expected Conflict, got {result:?}"
    );
    assert!(entries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_return_not_found_for_an_unknown_booking() {
    let usecase = TransitionBookingUseCase {
        bookings: MockBookingRepo::empty(),
        audit: MockAuditRepo::empty(),
    };

    let result = usecase
        .execute(
            &employee_user(EmployeeType::Admin, &[]),
            uuid_n(42),
            BookingStatus::Accepted,
        )
        .await;

    assert!(
        matches!(result, Err(ApiError::NotFound("Booking"))),
        "expected NotFound, got {result:?}"
    );
}
