use uuid::Uuid;

use skylift_api::error::ApiError;
use skylift_api::usecase::employee::{
    CreateEmployeeInput, CreateEmployeeUseCase, GetEmployeeUseCase, ListEmployeesUseCase,
};
use skylift_domain::employee::EmployeeType;
use skylift_domain::pagination::PageRequest;
use skylift_domain::permission::Permission;
use skylift_testing::fixture::uuid_n;

use crate::helpers::{
    MockEmployeeRepo, MockRoleRepo, MockStorage, customer_user, employee_record, employee_user,
    sample_role,
};

fn create_input(role_id: Uuid) -> CreateEmployeeInput {
    CreateEmployeeInput {
        name: "Grace Atim".to_owned(),
        email: "grace@example.com".to_owned(),
        phone_number: "+256782346200".to_owned(),
        password: "long enough".to_owned(),
        employee_type: "driver".to_owned(),
        role_id,
        photo: vec![0x89, b'P', b'N', b'G'],
    }
}

// ── CreateEmployeeUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_upload_the_photo_then_create_the_employee() {
    let actor = employee_user(EmployeeType::Admin, &[Permission::CreateEmployee]);
    let role = sample_role("Dispatcher", vec![Permission::ViewVehicle]);
    let role_id = role.id;
    let employees = MockEmployeeRepo::empty();
    let created = employees.created_handle();
    let storage = MockStorage::empty();
    let uploads = storage.uploads_handle();

    let usecase = CreateEmployeeUseCase {
        employees,
        roles: MockRoleRepo::new(vec![role]),
        storage,
    };
    let record = usecase.execute(&actor, create_input(role_id)).await.unwrap();

    assert_eq!(record.employee_type, EmployeeType::Driver);
    assert_eq!(uploads.lock().unwrap().as_slice(), ["user-photos"]);

    let created = created.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].photo_url, "https://cdn.test/user-photos/photo.png");
    assert!(created[0].hashed_password.starts_with("$argon2"));
    assert_eq!(created[0].role_id, role_id);
}

#[tokio::test]
async fn should_require_a_profile_picture() {
    let actor = employee_user(EmployeeType::Admin, &[Permission::CreateEmployee]);
    let role = sample_role("Dispatcher", vec![]);
    let role_id = role.id;
    let storage = MockStorage::empty();
    let uploads = storage.uploads_handle();
    let usecase = CreateEmployeeUseCase {
        employees: MockEmployeeRepo::empty(),
        roles: MockRoleRepo::new(vec![role]),
        storage,
    };
    let input = CreateEmployeeInput {
        photo: vec![],
        ..create_input(role_id)
    };

    let result = usecase.execute(&actor, input).await;

    assert!(
        matches!(result, Err(ApiError::BadRequest(ref m)) if m == "No profile picture uploaded"),
        "expected BadRequest, got {result:?}"
    );
    assert!(uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_check_the_role_before_uploading_anything() {
    let actor = employee_user(EmployeeType::Admin, &[Permission::CreateEmployee]);
    let storage = MockStorage::empty();
    let uploads = storage.uploads_handle();
    let usecase = CreateEmployeeUseCase {
        employees: MockEmployeeRepo::empty(),
        roles: MockRoleRepo::empty(),
        storage,
    };

    let result = usecase.execute(&actor, create_input(uuid_n(44))).await;

    assert!(
        matches!(result, Err(ApiError::NotFound("Role"))),
        "expected NotFound, got {result:?}"
    );
    assert!(uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_gate_creation_behind_create_employee() {
    let usecase = CreateEmployeeUseCase {
        employees: MockEmployeeRepo::empty(),
        roles: MockRoleRepo::empty(),
        storage: MockStorage::empty(),
    };

    let result = usecase
        .execute(&customer_user(uuid_n(7)), create_input(uuid_n(44)))
        .await;
    assert!(
        matches!(result, Err(ApiError::Unauthorized)),
        "expected Unauthorized, got {result:?}"
    );

    let result = usecase
        .execute(
            &employee_user(EmployeeType::Admin, &[Permission::ViewEmployee]),
            create_input(uuid_n(44)),
        )
        .await;
    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

// ── ListEmployeesUseCase / GetEmployeeUseCase ────────────────────────────────

#[tokio::test]
async fn should_page_the_employee_listing() {
    let employees = MockEmployeeRepo::new(vec![
        employee_record(31, "Grace"),
        employee_record(32, "Okello"),
        employee_record(33, "Asha"),
    ]);
    let usecase = ListEmployeesUseCase { employees };
    let actor = employee_user(EmployeeType::Admin, &[Permission::ViewEmployee]);

    let (records, info) = usecase
        .execute(&actor, PageRequest { page: 1, limit: 2 })
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(info.total, 3);
    assert_eq!(info.total_pages, 2);
    assert_eq!(info.limit, 2);
}

#[tokio::test]
async fn should_reject_an_oversized_page_limit() {
    let usecase = ListEmployeesUseCase {
        employees: MockEmployeeRepo::empty(),
    };
    let actor = employee_user(EmployeeType::Admin, &[Permission::ViewEmployee]);

    let result = usecase
        .execute(&actor, PageRequest { page: 1, limit: 41 })
        .await;

    assert!(
        matches!(result, Err(ApiError::BadRequest(ref m)) if m == "Max limit exceeded"),
        "expected BadRequest, got {result:?}"
    );
}

#[tokio::test]
async fn should_gate_the_listing_by_account_and_permission() {
    let usecase = ListEmployeesUseCase {
        employees: MockEmployeeRepo::empty(),
    };

    let result = usecase
        .execute(&customer_user(uuid_n(7)), PageRequest::default())
        .await;
    assert!(
        matches!(result, Err(ApiError::Unauthorized)),
        "expected Unauthorized, got {result:?}"
    );

    let result = usecase
        .execute(
            &employee_user(EmployeeType::Driver, &[]),
            PageRequest::default(),
        )
        .await;
    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_fetch_an_employee_by_id() {
    let record = employee_record(31, "Grace");
    let id = record.id;
    let usecase = GetEmployeeUseCase {
        employees: MockEmployeeRepo::new(vec![record]),
    };
    let actor = employee_user(EmployeeType::Admin, &[Permission::ViewEmployee]);

    let found = usecase.execute(&actor, id).await.unwrap();
    assert_eq!(found.user.name, "Grace");

    let result = usecase.execute(&actor, uuid_n(99)).await;
    assert!(
        matches!(result, Err(ApiError::NotFound("Employee"))),
        "expected NotFound, got {result:?}"
    );
}
