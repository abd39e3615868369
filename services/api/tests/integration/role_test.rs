use skylift_api::error::ApiError;
use skylift_api::usecase::role::{
    CreateRoleUseCase, DeleteRoleUseCase, GetRoleUseCase, RoleInput, UpdateRoleUseCase,
};
use skylift_domain::employee::EmployeeType;
use skylift_domain::permission::Permission;
use skylift_testing::fixture::uuid_n;

use crate::helpers::{MockRoleRepo, customer_user, employee_user, sample_role};

// ── CreateRoleUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_a_role_with_a_derived_slug() {
    let actor = employee_user(EmployeeType::Admin, &[Permission::CreateEmployeeRole]);
    let roles = MockRoleRepo::empty();
    let stored = roles.roles_handle();
    let usecase = CreateRoleUseCase { roles };

    let role = usecase
        .execute(
            &actor,
            RoleInput {
                name: "Fleet Manager".to_owned(),
                permissions: vec!["view vehicle".to_owned(), "create vehicle".to_owned()],
            },
        )
        .await
        .unwrap();

    assert_eq!(role.slug, "fleet-manager");
    assert_eq!(
        role.permissions,
        vec![Permission::ViewVehicle, Permission::CreateVehicle]
    );
    assert_eq!(stored.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_permissions_outside_the_catalog() {
    let actor = employee_user(EmployeeType::Admin, &[Permission::CreateEmployeeRole]);
    let usecase = CreateRoleUseCase {
        roles: MockRoleRepo::empty(),
    };

    let result = usecase
        .execute(
            &actor,
            RoleInput {
                name: "Ops".to_owned(),
                permissions: vec!["fly plane".to_owned()],
            },
        )
        .await;

    assert!(
        matches!(
            result,
            Err(ApiError::Validation(ref e)) if e[0].message == "unknown permission: fly plane"
        ),
        "expected validation error, got {result:?}"
    );
}

#[tokio::test]
async fn should_surface_a_duplicate_role_as_conflict() {
    let actor = employee_user(EmployeeType::Admin, &[Permission::CreateEmployeeRole]);
    let usecase = CreateRoleUseCase {
        roles: MockRoleRepo::duplicating(),
    };

    let result = usecase
        .execute(
            &actor,
            RoleInput {
                name: "Ops".to_owned(),
                permissions: vec!["view employee".to_owned()],
            },
        )
        .await;

    assert!(
        matches!(result, Err(ApiError::Conflict(_))),
        "expected Conflict, got {result:?}"
    );
}

// ── UpdateRoleUseCase / DeleteRoleUseCase ────────────────────────────────────

#[tokio::test]
async fn should_replace_name_and_permissions_keeping_the_slug() {
    let actor = employee_user(EmployeeType::Admin, &[Permission::EditEmployeeRole]);
    let role = sample_role("Dispatch Ops", vec![Permission::ViewEmployee]);
    let usecase = UpdateRoleUseCase {
        roles: MockRoleRepo::new(vec![role]),
    };

    let updated = usecase
        .execute(
            &actor,
            "dispatch-ops",
            RoleInput {
                name: "Dispatch".to_owned(),
                permissions: vec!["view employee".to_owned(), "view customer".to_owned()],
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.slug, "dispatch-ops");
    assert_eq!(updated.name, "Dispatch");
    assert_eq!(
        updated.permissions,
        vec![Permission::ViewEmployee, Permission::ViewCustomer]
    );
}

#[tokio::test]
async fn should_return_not_found_updating_an_unknown_slug() {
    let actor = employee_user(EmployeeType::Admin, &[Permission::EditEmployeeRole]);
    let usecase = UpdateRoleUseCase {
        roles: MockRoleRepo::empty(),
    };

    let result = usecase
        .execute(
            &actor,
            "missing",
            RoleInput {
                name: "Dispatch".to_owned(),
                permissions: vec!["view employee".to_owned()],
            },
        )
        .await;

    assert!(
        matches!(result, Err(ApiError::NotFound("Role"))),
        "expected NotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_delete_a_role_by_slug_once() {
    let actor = employee_user(EmployeeType::Admin, &[Permission::DeleteEmployeeRole]);
    let role = sample_role("Dispatch Ops", vec![Permission::ViewEmployee]);
    let roles = MockRoleRepo::new(vec![role]);
    let stored = roles.roles_handle();
    let usecase = DeleteRoleUseCase { roles };

    usecase.execute(&actor, "dispatch-ops").await.unwrap();
    assert!(stored.lock().unwrap().is_empty());

    let result = usecase.execute(&actor, "dispatch-ops").await;
    assert!(
        matches!(result, Err(ApiError::NotFound("Role"))),
        "expected NotFound, got {result:?}"
    );
}

// ── GetRoleUseCase ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_gate_role_reads() {
    let usecase = GetRoleUseCase {
        roles: MockRoleRepo::empty(),
    };

    let result = usecase.execute(&customer_user(uuid_n(7)), "ops").await;
    assert!(
        matches!(result, Err(ApiError::Unauthorized)),
        "expected Unauthorized, got {result:?}"
    );

    let result = usecase
        .execute(&employee_user(EmployeeType::Driver, &[]), "ops")
        .await;
    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_fetch_a_role_by_slug() {
    let actor = employee_user(EmployeeType::Admin, &[Permission::ViewEmployeeRole]);
    let role = sample_role("Dispatch Ops", vec![Permission::ViewEmployee]);
    let usecase = GetRoleUseCase {
        roles: MockRoleRepo::new(vec![role]),
    };

    let found = usecase.execute(&actor, "dispatch-ops").await.unwrap();
    assert_eq!(found.name, "Dispatch Ops");

    let result = usecase.execute(&actor, "missing").await;
    assert!(
        matches!(result, Err(ApiError::NotFound("Role"))),
        "expected NotFound, got {result:?}"
    );
}
