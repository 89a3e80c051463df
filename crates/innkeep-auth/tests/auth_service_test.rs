//! Integration tests for the authentication service.

use chrono::{Duration, Utc};
use innkeep_auth::config::AuthConfig;
use innkeep_auth::service::{AuthService, LoginInput, RegisterInput};
use innkeep_auth::token;
use innkeep_core::error::InnkeepError;
use innkeep_db::repository::SurrealUserRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

fn test_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-secret".into(),
        jwt_issuer: "innkeep-test".into(),
        ..AuthConfig::default()
    }
}

async fn setup() -> AuthService<SurrealUserRepository<Db>> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    innkeep_db::run_migrations(&db).await.unwrap();

    AuthService::new(SurrealUserRepository::new(db), test_config())
}

fn alice() -> RegisterInput {
    RegisterInput {
        email: "alice@example.com".into(),
        password: "Secret123".into(),
        first_name: "Alice".into(),
        last_name: "Liddell".into(),
    }
}

fn login_as(email: &str, password: &str) -> LoginInput {
    LoginInput {
        email: email.into(),
        password: password.into(),
    }
}

#[tokio::test]
async fn register_issues_a_verifiable_session() {
    let svc = setup().await;

    let session = svc.register(alice()).await.unwrap();

    let user_id = svc.verify(Some(&session.token)).unwrap();
    assert_eq!(user_id, session.user_id);

    let me = svc.current_user(user_id).await.unwrap();
    assert_eq!(me.email, "alice@example.com");
    assert_eq!(me.first_name, "Alice");
}

#[tokio::test]
async fn registering_twice_conflicts() {
    let svc = setup().await;
    svc.register(alice()).await.unwrap();

    let result = svc.register(alice()).await;

    assert!(
        matches!(result, Err(InnkeepError::AlreadyExists { .. })),
        "expected AlreadyExists, got {result:?}"
    );
}

#[tokio::test]
async fn register_validates_input() {
    let svc = setup().await;

    let result = svc
        .register(RegisterInput {
            email: "not-an-email".into(),
            password: "12345".into(),
            first_name: String::new(),
            last_name: "Liddell".into(),
        })
        .await;

    match result {
        Err(InnkeepError::Validation { message }) => {
            assert!(message.contains("Email is required"), "{message}");
            assert!(message.contains("First Name is required"), "{message}");
            assert!(message.contains("6 or more characters"), "{message}");
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn login_with_correct_password() {
    let svc = setup().await;
    let registered = svc.register(alice()).await.unwrap();

    let session = svc
        .login(login_as("alice@example.com", "Secret123"))
        .await
        .unwrap();

    assert_eq!(session.user_id, registered.user_id);
    assert_eq!(svc.verify(Some(&session.token)).unwrap(), registered.user_id);
}

#[tokio::test]
async fn login_with_wrong_password_fails() {
    let svc = setup().await;
    svc.register(alice()).await.unwrap();

    let result = svc.login(login_as("alice@example.com", "wrong-pass")).await;
    assert!(matches!(
        result,
        Err(InnkeepError::AuthenticationFailed { .. })
    ));
}

#[tokio::test]
async fn login_password_is_case_sensitive() {
    let svc = setup().await;
    svc.register(alice()).await.unwrap();

    let result = svc.login(login_as("alice@example.com", "secret123")).await;
    assert!(matches!(
        result,
        Err(InnkeepError::AuthenticationFailed { .. })
    ));
}

#[tokio::test]
async fn login_with_unknown_email_fails_the_same_way() {
    let svc = setup().await;

    let result = svc.login(login_as("nobody@example.com", "Secret123")).await;
    match result {
        Err(InnkeepError::AuthenticationFailed { reason }) => {
            assert_eq!(reason, "Invalid Credentials");
        }
        other => panic!("expected AuthenticationFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn verify_accepts_within_a_day_and_rejects_after() {
    let svc = setup().await;
    let user_id = Uuid::new_v4();

    let fresh = token::issue_token_at(user_id, Utc::now() - Duration::hours(1), svc.config())
        .unwrap();
    assert_eq!(svc.verify(Some(&fresh)).unwrap(), user_id);

    let stale = token::issue_token_at(user_id, Utc::now() - Duration::hours(25), svc.config())
        .unwrap();
    assert!(matches!(
        svc.verify(Some(&stale)),
        Err(InnkeepError::Unauthorized { .. })
    ));
}

#[tokio::test]
async fn verify_without_token_is_unauthorized() {
    let svc = setup().await;

    assert!(matches!(
        svc.verify(None),
        Err(InnkeepError::Unauthorized { .. })
    ));
    assert!(matches!(
        svc.verify(Some("")),
        Err(InnkeepError::Unauthorized { .. })
    ));
    assert!(matches!(
        svc.verify(Some("garbage")),
        Err(InnkeepError::Unauthorized { .. })
    ));
}

#[tokio::test]
async fn register_stores_only_the_argon2_hash() {
    let svc = setup().await;
    let session = svc.register(alice()).await.unwrap();

    let me = svc.current_user(session.user_id).await.unwrap();
    assert!(me.password_hash.starts_with("$argon2id$"));
    assert!(!me.password_hash.contains("Secret123"));
}

#[tokio::test]
async fn pepper_is_required_to_log_in() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    innkeep_db::run_migrations(&db).await.unwrap();

    let peppered = AuthService::new(
        SurrealUserRepository::new(db.clone()),
        AuthConfig {
            pepper: Some("kitchen".into()),
            ..test_config()
        },
    );
    peppered.register(alice()).await.unwrap();
    assert!(
        peppered
            .login(login_as("alice@example.com", "Secret123"))
            .await
            .is_ok()
    );

    let plain = AuthService::new(SurrealUserRepository::new(db), test_config());
    let result = plain.login(login_as("alice@example.com", "Secret123")).await;
    assert!(matches!(
        result,
        Err(InnkeepError::AuthenticationFailed { .. })
    ));
}
