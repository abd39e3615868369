use chrono::NaiveDate;

use skylift_api::error::ApiError;
use skylift_api::usecase::audit::ListAuditLogsUseCase;
use skylift_domain::employee::EmployeeType;
use skylift_domain::permission::Permission;
use skylift_testing::fixture::uuid_n;

use crate::helpers::{MockAuditRepo, audit_entry_at, customer_user, employee_user};

// ── ListAuditLogsUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_only_the_requested_day() {
    let day = NaiveDate::from_ymd_opt(2026, 8, 21).unwrap();
    let morning = day.and_hms_opt(8, 30, 0).unwrap().and_utc();
    let next_day = day
        .succ_opt()
        .unwrap()
        .and_hms_opt(0, 5, 0)
        .unwrap()
        .and_utc();
    let audit = MockAuditRepo::with_entries(vec![
        audit_entry_at(morning, "Okello logged into the dashboard"),
        audit_entry_at(next_day, "Okello logged out of the dashboard"),
    ]);
    let usecase = ListAuditLogsUseCase { audit };
    let actor = employee_user(EmployeeType::Admin, &[Permission::ViewAuditLogs]);

    let entries = usecase.execute(&actor, day).await.unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].description, "Okello logged into the dashboard");
}

#[tokio::test]
async fn should_gate_the_trail_behind_view_audit_logs() {
    let usecase = ListAuditLogsUseCase {
        audit: MockAuditRepo::empty(),
    };
    let day = NaiveDate::from_ymd_opt(2026, 8, 21).unwrap();

    let result = usecase.execute(&customer_user(uuid_n(7)), day).await;
    assert!(
        matches!(result, Err(ApiError::Unauthorized)),
        "expected Unauthorized, got {result:?}"
    );

    let result = usecase
        .execute(
            &employee_user(EmployeeType::Driver, &[Permission::ViewEmployee]),
            day,
        )
        .await;
    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}
