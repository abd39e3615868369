use skylift_api::domain::types::AuthSession;
use skylift_api::error::ApiError;
use skylift_api::usecase::session::{
    CustomerSignupInput, CustomerSignupUseCase, DeleteSessionUseCase, EmployeeLoginInput,
    EmployeeLoginUseCase, LogoutUseCase, ValidateSessionUseCase,
};
use skylift_domain::employee::EmployeeType;
use skylift_testing::fixture::{past, uuid_n};

use crate::helpers::{
    MockAccountRepo, MockAuditRepo, MockSessionRepo, TEST_PASSWORD, account_for, customer_user,
    employee_user, session_for,
};

// ── EmployeeLoginUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_log_an_employee_into_the_dashboard() {
    let user = employee_user(EmployeeType::Admin, &[]);
    let account = account_for(user.clone(), TEST_PASSWORD).await;
    let sessions = MockSessionRepo::empty();
    let stored_sessions = sessions.sessions_handle();
    let audit = MockAuditRepo::empty();
    let entries = audit.appended_handle();

    let usecase = EmployeeLoginUseCase {
        accounts: MockAccountRepo::new(vec![account]),
        sessions,
        audit,
    };
    let (session, logged_in) = usecase
        .execute(EmployeeLoginInput {
            phone_number: "+256700000002".to_owned(),
            password: TEST_PASSWORD.to_owned(),
            user_agent: Some("dashboard/1.0".to_owned()),
        })
        .await
        .unwrap();

    assert_eq!(logged_in.id, user.id);
    assert_eq!(session.user_id, user.id);
    assert_eq!(session.user_agent.as_deref(), Some("dashboard/1.0"));
    assert_eq!(stored_sessions.lock().unwrap().len(), 1);

    let entries = entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].description, "Okello logged into the dashboard");
    assert_eq!(entries[0].actor_id, Some(uuid_n(3)));
    assert_eq!(entries[0].target_id.as_deref(), Some(session.id.as_str()));
    assert_eq!(entries[0].target_type.as_deref(), Some("Session"));
}

#[tokio::test]
async fn should_audit_an_unknown_phone_number_without_an_actor() {
    let audit = MockAuditRepo::empty();
    let entries = audit.appended_handle();
    let usecase = EmployeeLoginUseCase {
        accounts: MockAccountRepo::empty(),
        sessions: MockSessionRepo::empty(),
        audit,
    };

    let result = usecase
        .execute(EmployeeLoginInput {
            phone_number: "+256799999999".to_owned(),
            password: TEST_PASSWORD.to_owned(),
            user_agent: None,
        })
        .await;

    assert!(
        matches!(result, Err(ApiError::BadRequest(ref m)) if m == "Invalid email or password"),
        "expected BadRequest, got {result:?}"
    );
    let entries = entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0].description,
        "Unauthorized login attempt for phone number +256799999999"
    );
    assert_eq!(entries[0].actor_id, None);
}

#[tokio::test]
async fn should_audit_a_wrong_password_as_invalid_attempt() {
    let user = employee_user(EmployeeType::Admin, &[]);
    let account = account_for(user, TEST_PASSWORD).await;
    let sessions = MockSessionRepo::empty();
    let stored_sessions = sessions.sessions_handle();
    let audit = MockAuditRepo::empty();
    let entries = audit.appended_handle();
    let usecase = EmployeeLoginUseCase {
        accounts: MockAccountRepo::new(vec![account]),
        sessions,
        audit,
    };

    let result = usecase
        .execute(EmployeeLoginInput {
            phone_number: "+256700000002".to_owned(),
            password: "not the password".to_owned(),
            user_agent: None,
        })
        .await;

    assert!(
        matches!(result, Err(ApiError::BadRequest(_))),
        "expected BadRequest, got {result:?}"
    );
    assert_eq!(entries.lock().unwrap()[0].description, "Invalid login attempt");
    assert!(stored_sessions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_customer_accounts_on_the_dashboard_login() {
    let user = customer_user(uuid_n(7));
    let account = account_for(user, TEST_PASSWORD).await;
    let audit = MockAuditRepo::empty();
    let entries = audit.appended_handle();
    let usecase = EmployeeLoginUseCase {
        accounts: MockAccountRepo::new(vec![account]),
        sessions: MockSessionRepo::empty(),
        audit,
    };

    let result = usecase
        .execute(EmployeeLoginInput {
            phone_number: "+256700000001".to_owned(),
            password: TEST_PASSWORD.to_owned(),
            user_agent: None,
        })
        .await;

    assert!(
        matches!(result, Err(ApiError::BadRequest(_))),
        "expected BadRequest, got {result:?}"
    );
    assert_eq!(
        entries.lock().unwrap()[0].description,
        "Unauthorized login attempt for phone number +256700000001"
    );
}

// ── CustomerSignupUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_sign_up_a_customer_and_open_a_session() {
    let accounts = MockAccountRepo::empty();
    let signups = accounts.signups_handle();
    let sessions = MockSessionRepo::empty();
    let stored_sessions = sessions.sessions_handle();

    let usecase = CustomerSignupUseCase { accounts, sessions };
    let (session, user) = usecase
        .execute(CustomerSignupInput {
            name: "Amina K".to_owned(),
            email: "amina@example.com".to_owned(),
            phone_number: "+256700000001".to_owned(),
            password: "long enough".to_owned(),
            user_agent: None,
        })
        .await
        .unwrap();

    assert_eq!(user.name, "Amina K");
    assert!(user.customer.is_some());
    assert_eq!(session.user_id, user.id);
    assert_eq!(stored_sessions.lock().unwrap().len(), 1);

    let signups = signups.lock().unwrap();
    assert_eq!(signups.len(), 1);
    assert!(signups[0].hashed_password.starts_with("$argon2"));
}

#[tokio::test]
async fn should_not_open_a_session_when_signup_validation_fails() {
    let sessions = MockSessionRepo::empty();
    let stored_sessions = sessions.sessions_handle();
    let usecase = CustomerSignupUseCase {
        accounts: MockAccountRepo::empty(),
        sessions,
    };

    let result = usecase
        .execute(CustomerSignupInput {
            name: String::new(),
            email: "not-an-email".to_owned(),
            phone_number: String::new(),
            password: "short".to_owned(),
            user_agent: None,
        })
        .await;

    assert!(
        matches!(result, Err(ApiError::Validation(ref e)) if e.len() == 4),
        "expected four field errors, got {result:?}"
    );
    assert!(stored_sessions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_surface_a_duplicate_signup_as_conflict() {
    let sessions = MockSessionRepo::empty();
    let stored_sessions = sessions.sessions_handle();
    let usecase = CustomerSignupUseCase {
        accounts: MockAccountRepo::taken(),
        sessions,
    };

    let result = usecase
        .execute(CustomerSignupInput {
            name: "Amina K".to_owned(),
            email: "amina@example.com".to_owned(),
            phone_number: "+256700000001".to_owned(),
            password: "long enough".to_owned(),
            user_agent: None,
        })
        .await;

    assert!(
        matches!(result, Err(ApiError::Conflict(_))),
        "expected Conflict, got {result:?}"
    );
    assert!(stored_sessions.lock().unwrap().is_empty());
}

// ── ValidateSessionUseCase ───────────────────────────────────────────────────

#[tokio::test]
async fn should_resolve_a_live_session_token() {
    let user = customer_user(uuid_n(7));
    let session = session_for(user.id);
    let usecase = ValidateSessionUseCase {
        sessions: MockSessionRepo::resolving(AuthSession {
            user: user.clone(),
            session: session.clone(),
        }),
    };

    let auth = usecase.execute(&session.id).await.unwrap();

    assert_eq!(auth.user.id, user.id);
    assert_eq!(auth.session.id, session.id);
}

#[tokio::test]
async fn should_reject_unknown_and_expired_tokens_alike() {
    let usecase = ValidateSessionUseCase {
        sessions: MockSessionRepo::empty(),
    };
    let token = "0".repeat(64);
    let result = usecase.execute(&token).await;
    assert!(
        matches!(result, Err(ApiError::Unauthorized)),
        "expected Unauthorized, got {result:?}"
    );

    let user = customer_user(uuid_n(7));
    let mut session = session_for(user.id);
    session.expires_at = past();
    let usecase = ValidateSessionUseCase {
        sessions: MockSessionRepo::resolving(AuthSession {
            user,
            session: session.clone(),
        }),
    };
    let result = usecase.execute(&session.id).await;
    assert!(
        matches!(result, Err(ApiError::Unauthorized)),
        "expected Unauthorized, got {result:?}"
    );
}

#[tokio::test]
async fn should_forbid_a_deactivated_user_with_a_live_session() {
    let mut user = customer_user(uuid_n(7));
    user.is_active = false;
    let session = session_for(user.id);
    let usecase = ValidateSessionUseCase {
        sessions: MockSessionRepo::resolving(AuthSession {
            user,
            session: session.clone(),
        }),
    };

    let result = usecase.execute(&session.id).await;

    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

// ── LogoutUseCase / DeleteSessionUseCase ─────────────────────────────────────

#[tokio::test]
async fn should_log_out_and_audit_it() {
    let user = employee_user(EmployeeType::Admin, &[]);
    let session = session_for(user.id);
    let sessions = MockSessionRepo::new(vec![session.clone()]);
    let stored_sessions = sessions.sessions_handle();
    let audit = MockAuditRepo::empty();
    let entries = audit.appended_handle();

    let usecase = LogoutUseCase { sessions, audit };
    usecase
        .execute(&AuthSession { user, session })
        .await
        .unwrap();

    assert!(stored_sessions.lock().unwrap().is_empty());
    let entries = entries.lock().unwrap();
    assert_eq!(entries[0].description, "Okello logged out of the dashboard");
    assert_eq!(entries[0].actor_id, Some(uuid_n(3)));
}

#[tokio::test]
async fn should_not_delete_a_session_belonging_to_someone_else() {
    let session = session_for(uuid_n(1));
    let sessions = MockSessionRepo::new(vec![session.clone()]);
    let stored_sessions = sessions.sessions_handle();
    let usecase = DeleteSessionUseCase { sessions };

    let result = usecase.execute(&session.id, uuid_n(9)).await;

    assert!(
        matches!(result, Err(ApiError::NotFound("Session"))),
        "expected NotFound, got {result:?}"
    );
    assert_eq!(stored_sessions.lock().unwrap().len(), 1);
}
