use std::sync::Arc;

use api_users::services::user::UserService;
use common::{error::AppError, password::hash_password};
use db::{dtos::user::UserPayload, mock::MemoryUserRepository, models::user::User};

fn user(user_id: i32, username: &str, password: &str, email: &str, role_id: i32) -> User {
    User {
        user_id,
        username: username.to_string(),
        password: hash_password(password).expect("hash"),
        first_name: "First".to_string(),
        last_name: "Last".to_string(),
        email: email.to_string(),
        role_id,
    }
}

fn mock_users() -> Vec<User> {
    vec![
        user(1, "khkeipe", "password", "kkeipe@example.com", 3),
        user(2, "fmanager", "locked", "locked@example.com", 2),
        user(3, "admin", "password", "secure@example.com", 1),
    ]
}

fn setup(users: Vec<User>) -> (Arc<MemoryUserRepository>, UserService) {
    let repo = Arc::new(MemoryUserRepository::new(users));
    let service = UserService::new(repo.clone());
    (repo, service)
}

fn payload(user_id: Option<i32>, username: &str, email: &str) -> UserPayload {
    UserPayload {
        user_id,
        username: Some(username.to_string()),
        password: Some("s3cret".to_string()),
        first_name: Some("New".to_string()),
        last_name: Some("Person".to_string()),
        email: Some(email.to_string()),
        role_id: Some(3),
    }
}

#[tokio::test]
async fn get_all_users_strips_passwords() {
    let (_, service) = setup(mock_users());

    let users = service.get_all_users().await.unwrap();

    assert_eq!(users.len(), 3);
    for user in &users {
        let json = serde_json::to_value(user).unwrap();
        assert!(json.get("password").is_none());
    }
}

#[tokio::test]
async fn get_all_users_fails_when_empty() {
    let (_, service) = setup(vec![]);

    let result = service.get_all_users().await;

    assert!(matches!(result, Err(AppError::DataNotFound(_))));
}

#[tokio::test]
async fn get_user_by_id_returns_user_without_password() {
    let (repo, service) = setup(mock_users());

    let user = service.get_user_by_id("1").await.unwrap();

    assert_eq!(user.user_id, 1);
    assert_eq!(user.username, "khkeipe");
    assert!(serde_json::to_value(&user).unwrap().get("password").is_none());
    assert_eq!(repo.calls(), vec!["get_by_id(1)"]);
}

#[tokio::test]
async fn malformed_ids_fail_before_reaching_the_repository() {
    let (repo, service) = setup(mock_users());

    for raw in ["-1", "0", "1.01", "NaN", "abc"] {
        let result = service.get_user_by_id(raw).await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))), "{raw}");

        let result = service.delete_user_by_id(raw).await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))), "{raw}");
    }

    assert!(repo.calls().is_empty());
}

#[tokio::test]
async fn get_user_by_id_fails_for_unknown_user() {
    let (_, service) = setup(mock_users());

    let result = service.get_user_by_id("99").await;

    assert!(matches!(result, Err(AppError::DataNotFound(_))));
}

#[tokio::test]
async fn save_user_stores_hashed_password_and_hides_it() {
    let (repo, service) = setup(mock_users());

    let saved = service
        .save_user(payload(None, "newbie", "newbie@example.com"))
        .await
        .unwrap();

    assert_eq!(saved.user_id, 4);
    assert!(serde_json::to_value(&saved).unwrap().get("password").is_none());

    let stored = repo.users().into_iter().find(|u| u.user_id == 4).unwrap();
    assert_ne!(stored.password, "s3cret");
    assert!(stored.password.starts_with("$argon2"));
}

#[tokio::test]
async fn save_user_conflicts_on_username_or_email() {
    let (repo, service) = setup(mock_users());

    let taken_username = service
        .save_user(payload(None, "khkeipe", "fresh@example.com"))
        .await;
    assert!(matches!(taken_username, Err(AppError::Conflict(_))));

    let taken_email = service
        .save_user(payload(None, "fresh", "locked@example.com"))
        .await;
    assert!(matches!(taken_email, Err(AppError::Conflict(_))));

    assert_eq!(repo.users().len(), 3);
}

#[tokio::test]
async fn save_user_rejects_incomplete_payload() {
    let (repo, service) = setup(mock_users());
    let mut incomplete = payload(None, "newbie", "newbie@example.com");
    incomplete.email = Some(String::new());

    let result = service.save_user(incomplete).await;

    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    assert!(repo.calls().is_empty());
}

#[tokio::test]
async fn update_user_allows_keeping_own_username_and_email() {
    let (repo, service) = setup(mock_users());

    let result = service
        .update_user(payload(Some(1), "khkeipe", "kkeipe@example.com"))
        .await
        .unwrap();

    assert!(result);
    let stored = repo.users().into_iter().find(|u| u.user_id == 1).unwrap();
    assert_eq!(stored.first_name, "New");
}

#[tokio::test]
async fn update_user_conflicts_with_another_users_identity() {
    let (_, service) = setup(mock_users());

    let username_clash = service
        .update_user(payload(Some(1), "admin", "kkeipe@example.com"))
        .await;
    assert!(matches!(username_clash, Err(AppError::Conflict(_))));

    let email_clash = service
        .update_user(payload(Some(1), "khkeipe", "secure@example.com"))
        .await;
    assert!(matches!(email_clash, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn update_user_requires_the_id() {
    let (_, service) = setup(mock_users());

    let result = service
        .update_user(payload(None, "khkeipe", "kkeipe@example.com"))
        .await;

    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
}

#[tokio::test]
async fn delete_user_by_id_calls_repository() {
    let (repo, service) = setup(mock_users());

    assert!(service.delete_user_by_id("2").await.unwrap());
    assert_eq!(repo.calls(), vec!["delete_by_id(2)"]);
}

#[tokio::test]
async fn authentication_returns_user_without_password() {
    let (_, service) = setup(mock_users());

    let user = service
        .authentication(Some("admin"), Some("password"))
        .await
        .unwrap();

    assert_eq!(user.user_id, 3);
    assert_eq!(user.role_id, 1);
}

#[tokio::test]
async fn authentication_with_wrong_password_is_invalid_request() {
    let (_, service) = setup(vec![user(5, "bob", "right", "bob@example.com", 3)]);

    let result = service.authentication(Some("bob"), Some("wrong")).await;

    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
}

#[tokio::test]
async fn authentication_of_unknown_user_fails() {
    let (_, service) = setup(mock_users());

    let result = service.authentication(Some("ghost"), Some("boo")).await;

    assert!(matches!(result, Err(AppError::Authentication(_))));
}

#[tokio::test]
async fn authentication_requires_both_credentials() {
    let (repo, service) = setup(mock_users());

    let missing = service.authentication(None, Some("password")).await;
    assert!(matches!(missing, Err(AppError::InvalidRequest(_))));

    let empty = service.authentication(Some("admin"), Some("")).await;
    assert!(matches!(empty, Err(AppError::InvalidRequest(_))));

    assert!(repo.calls().is_empty());
}

#[tokio::test]
async fn storage_faults_surface_as_internal_errors() {
    let (repo, service) = setup(mock_users());
    repo.fail_queries();

    let result = service.get_all_users().await;

    assert!(matches!(result, Err(AppError::Database(_))));
}
