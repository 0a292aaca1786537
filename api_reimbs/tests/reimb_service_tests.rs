use std::{str::FromStr, sync::Arc};

use api_reimbs::services::reimb::ReimbService;
use bigdecimal::BigDecimal;
use chrono::Utc;
use common::error::AppError;
use db::{dtos::reimb::ReimbPayload, mock::MemoryReimbRepository, models::reimb::Reimbursement};

fn reimb(id: i32, amount: &str, description: &str, status_id: i32, type_id: i32) -> Reimbursement {
    Reimbursement {
        id,
        amount: BigDecimal::from_str(amount).unwrap(),
        submitted: Utc::now(),
        resolved: Some(Utc::now()),
        description: description.to_string(),
        author_id: 1,
        resolver_id: Some(2),
        status_id,
        type_id,
    }
}

fn mock_reimbs() -> Vec<Reimbursement> {
    vec![
        reimb(1, "20.25", "some reimbursement", 1, 4),
        reimb(2, "120.65", "some other reimbursement", 2, 2),
        reimb(3, "32.50", "some more reimbursement", 3, 1),
    ]
}

fn setup(reimbs: Vec<Reimbursement>) -> (Arc<MemoryReimbRepository>, ReimbService) {
    let repo = Arc::new(MemoryReimbRepository::new(reimbs));
    let service = ReimbService::new(repo.clone());
    (repo, service)
}

fn new_payload() -> ReimbPayload {
    ReimbPayload {
        amount: Some(BigDecimal::from_str("45.10").unwrap()),
        description: Some("hotel".to_string()),
        author_id: Some(1),
        status_id: Some(1),
        type_id: Some(1),
        ..ReimbPayload::default()
    }
}

#[tokio::test]
async fn get_all_reimbs_returns_every_row() {
    let (_, service) = setup(mock_reimbs());

    let reimbs = service.get_all_reimbs().await.unwrap();

    assert_eq!(reimbs.len(), 3);
    assert_eq!(reimbs[0].id, 1);
}

#[tokio::test]
async fn get_all_reimbs_fails_when_empty() {
    let (_, service) = setup(vec![]);

    let result = service.get_all_reimbs().await;

    assert!(matches!(result, Err(AppError::DataNotFound(_))));
}

#[tokio::test]
async fn get_reimb_by_id_finds_existing_row() {
    let (_, service) = setup(mock_reimbs());

    let found = service.get_reimb_by_id("2").await.unwrap();

    assert_eq!(found.description, "some other reimbursement");
}

#[tokio::test]
async fn get_reimb_by_id_rejects_malformed_ids_without_querying() {
    let (repo, service) = setup(mock_reimbs());

    for raw in ["-1", "0", "1.5", "NaN"] {
        let result = service.get_reimb_by_id(raw).await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))), "{raw}");
    }

    assert!(repo.calls().is_empty());
}

#[tokio::test]
async fn get_reimb_by_id_fails_for_missing_row() {
    let (_, service) = setup(mock_reimbs());

    let result = service.get_reimb_by_id("40").await;

    assert!(matches!(result, Err(AppError::DataNotFound(_))));
}

#[tokio::test]
async fn saved_reimb_starts_unresolved() {
    let (_, service) = setup(mock_reimbs());

    let saved = service.save_reimb(new_payload()).await.unwrap();
    let fetched = service.get_reimb_by_id(&saved.id.to_string()).await.unwrap();

    assert_eq!(fetched.id, 4);
    assert!(fetched.resolved.is_none());
    assert!(fetched.resolver_id.is_none());
    assert!(fetched.submitted <= Utc::now());
}

#[tokio::test]
async fn save_reimb_rejects_missing_fields() {
    let (repo, service) = setup(mock_reimbs());
    let payload = ReimbPayload {
        amount: None,
        ..new_payload()
    };

    let result = service.save_reimb(payload).await;

    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    assert!(repo.calls().is_empty());
}

#[tokio::test]
async fn delete_reimb_by_id_calls_repository_with_id() {
    let (repo, service) = setup(mock_reimbs());

    let deleted = service.delete_reimb_by_id("1").await.unwrap();

    assert!(deleted);
    assert_eq!(repo.calls(), vec!["delete_by_id(1)"]);
}

#[tokio::test]
async fn update_reimb_requires_full_record() {
    let (repo, service) = setup(mock_reimbs());

    let result = service.update_reimb(new_payload()).await;

    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    assert!(repo.calls().is_empty());
}

#[tokio::test]
async fn update_reimb_assigns_resolver() {
    let (repo, service) = setup(mock_reimbs());
    let saved = service.save_reimb(new_payload()).await.unwrap();

    let updated = service
        .update_reimb(ReimbPayload {
            id: Some(saved.id),
            submitted: Some(saved.submitted),
            resolver_id: Some(3),
            status_id: Some(2),
            ..new_payload()
        })
        .await
        .unwrap();

    assert!(updated);
    let stored = repo.reimbs().into_iter().find(|r| r.id == saved.id).unwrap();
    assert_eq!(stored.resolver_id, Some(3));
    assert_eq!(stored.status_id, 2);
    assert!(stored.resolved.is_some());
}

#[tokio::test]
async fn update_reimb_replaces_the_whole_row() {
    let (repo, service) = setup(mock_reimbs());
    let original = repo.reimbs().into_iter().find(|r| r.id == 1).unwrap();

    let updated = service
        .update_reimb(ReimbPayload {
            id: Some(1),
            amount: Some(BigDecimal::from_str("99.99").unwrap()),
            submitted: Some(original.submitted),
            description: Some("corrected".to_string()),
            author_id: Some(original.author_id),
            resolver_id: None,
            status_id: Some(3),
            type_id: Some(2),
            ..ReimbPayload::default()
        })
        .await
        .unwrap();

    assert!(updated);
    let stored = repo.reimbs().into_iter().find(|r| r.id == 1).unwrap();
    assert_eq!(stored.amount, BigDecimal::from_str("99.99").unwrap());
    assert_eq!(stored.description, "corrected");
    assert_eq!(stored.status_id, 3);
    assert_eq!(stored.type_id, 2);
    assert!(stored.resolver_id.is_none());
    assert!(stored.resolved.is_none());
}
