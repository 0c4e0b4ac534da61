use std::sync::Arc;

use tempfile::TempDir;

use crate::error::ShopError;
use crate::models::{Product, User};
use crate::service::ShopService;
use crate::store::{InMemoryStore, Store};
use crate::tests::create_test_service;
use crate::upload::UploadSink;

#[tokio::test]
async fn signup_then_login_round_trips() {
    let (service, _uploads) = create_test_service();
    let user = service
        .signup("Ana".into(), "ana@example.com".into(), "secret".into())
        .await
        .unwrap();

    let (logged_in, token) = service.login("ana@example.com", "secret").await.unwrap();
    assert_eq!(logged_in.id, user.id);
    assert_eq!(token, format!("token-{}", user.id));
}

#[tokio::test]
async fn login_token_is_deterministic_per_user() {
    let (service, _uploads) = create_test_service();
    service
        .signup("Ana".into(), "ana@example.com".into(), "secret".into())
        .await
        .unwrap();
    let ben = service
        .signup("Ben".into(), "ben@example.com".into(), "hunter2".into())
        .await
        .unwrap();

    let (_, first) = service.login("ana@example.com", "secret").await.unwrap();
    let (_, second) = service.login("ana@example.com", "secret").await.unwrap();
    assert_eq!(first, second);

    let (_, other) = service.login("ben@example.com", "hunter2").await.unwrap();
    assert_ne!(first, other);
    assert_eq!(other, format!("token-{}", ben.id));
}

#[tokio::test]
async fn duplicate_email_never_creates_second_record() {
    let users = Arc::new(InMemoryStore::<User>::new());
    let dir = TempDir::new().unwrap();
    let service = ShopService::new(
        users.clone(),
        InMemoryStore::<Product>::new(),
        UploadSink::new(dir.path()),
    );

    service
        .signup("Ana".into(), "ana@example.com".into(), "secret".into())
        .await
        .unwrap();
    for _ in 0..3 {
        let result = service
            .signup("Imposter".into(), "ana@example.com".into(), "other".into())
            .await;
        assert!(matches!(result, Err(ShopError::EmailAlreadyRegistered(_))));
    }

    let stored = users.load().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Ana");
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let (service, _uploads) = create_test_service();
    service
        .signup("Ana".into(), "ana@example.com".into(), "secret".into())
        .await
        .unwrap();

    let wrong_password = service.login("ana@example.com", "nope").await;
    assert!(matches!(wrong_password, Err(ShopError::InvalidCredentials)));

    let unknown_user = service.login("ghost@example.com", "secret").await;
    assert!(matches!(unknown_user, Err(ShopError::InvalidCredentials)));
}

#[tokio::test]
async fn public_view_strips_password() {
    let (service, _uploads) = create_test_service();
    let user = service
        .signup("Ana".into(), "ana@example.com".into(), "secret".into())
        .await
        .unwrap();

    let json = serde_json::to_value(user.public()).unwrap();
    assert!(json.get("password").is_none());
    assert_eq!(json["email"], "ana@example.com");
    assert!(json.get("createdAt").is_some());
}
