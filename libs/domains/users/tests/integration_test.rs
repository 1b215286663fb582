//! Integration tests for Users domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - Queries and ordering work against the migrated schema
//! - The unique email index is surfaced as a conflict
//! - Full-replace updates and deletes hit the right rows
//!
//! They need a Docker daemon and are ignored by default.
//! Run with `cargo test -p domain_users -- --ignored`.

use domain_users::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

fn details(builder: &TestDataBuilder, label: &str, approver_id: Option<i64>) -> UserDetails {
    UserDetails {
        first_name: "John".to_string(),
        last_name: builder.name("user", label),
        email_address: builder.email(label),
        approver_id,
    }
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_get_user() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let input = details(&builder, "main", Some(1234));
    let created = repo.save(None, input.clone()).await.unwrap();

    assert!(created.id > 0);
    assert_eq!(created.email_address, input.email_address);
    assert_eq!(created.approver_id, Some(1234));

    let retrieved = assert_some(repo.find_by_id(created.id).await.unwrap(), "user should exist");
    assert_eq!(retrieved, created);

    let by_email = assert_some(
        repo.find_by_email(&input.email_address).await.unwrap(),
        "user should be found by email",
    );
    assert_id_eq(by_email.id, created.id, "lookup by email");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_email_constraint() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("duplicate_email");

    let first = repo.save(None, details(&builder, "dup", None)).await.unwrap();

    let mut second = details(&builder, "dup", None);
    second.first_name = "Johnny".to_string();
    let result = repo.save(None, second).await;

    assert!(
        matches!(result, Err(UserError::AlreadyExists { id }) if id == first.id),
        "expected AlreadyExists for the first row, got {:?}",
        result
    );
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_replaces_every_field() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_replace");

    let created = repo
        .save(None, details(&builder, "before", Some(9)))
        .await
        .unwrap();

    let replacement = UserDetails {
        first_name: "Jane".to_string(),
        last_name: "Roe".to_string(),
        email_address: builder.email("after"),
        approver_id: None,
    };
    let updated = repo
        .save(Some(created.id), replacement.clone())
        .await
        .unwrap();

    assert_eq!(updated, User::from_details(created.id, replacement));
    assert_eq!(repo.find_by_id(created.id).await.unwrap(), Some(updated));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_onto_taken_email_is_conflict() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_conflict");

    let owner = repo.save(None, details(&builder, "owner", None)).await.unwrap();
    let other = repo.save(None, details(&builder, "other", None)).await.unwrap();

    let result = repo
        .save(Some(other.id), details(&builder, "owner", None))
        .await;

    assert!(matches!(result, Err(UserError::AlreadyExists { id }) if id == owner.id));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_missing_row_is_not_found() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_missing");

    let result = repo.save(Some(987_654), details(&builder, "ghost", None)).await;

    assert!(matches!(result, Err(UserError::NotFound(987_654))));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_name_lookup_and_approver_listing() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("name_and_approver");

    let approver = repo.save(None, details(&builder, "boss", None)).await.unwrap();

    let mut twin_a = details(&builder, "twin-a", Some(approver.id));
    let mut twin_b = details(&builder, "twin-b", Some(approver.id));
    twin_a.last_name = "Twin".to_string();
    twin_b.last_name = "Twin".to_string();
    let first = repo.save(None, twin_a).await.unwrap();
    let second = repo.save(None, twin_b).await.unwrap();

    let found = assert_some(
        repo.find_by_first_and_last_name("John", "Twin").await.unwrap(),
        "twin should be found",
    );
    assert_id_eq(found.id, first.id, "lowest id wins");

    let ids: Vec<i64> = repo
        .find_all_by_approver_id(approver.id)
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(ids, vec![first.id, second.id]);

    assert!(
        repo.find_all_by_approver_id(first.id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_user() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("delete");

    let created = repo.save(None, details(&builder, "gone", None)).await.unwrap();

    assert!(repo.delete_by_id(created.id).await.unwrap());
    assert!(!repo.delete_by_id(created.id).await.unwrap());
    assert!(repo.find_by_id(created.id).await.unwrap().is_none());
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_service_lifecycle() {
    let db = TestDatabase::new().await;
    db.truncate_users().await;
    let service = UserService::new(PgUserRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("service_lifecycle");

    let approver = service
        .create_user(details(&builder, "approver", None))
        .await
        .unwrap();
    assert_id_eq(approver.id, 1, "identity restarted");

    assert!(
        service
            .list_users_by_approver(approver.id)
            .await
            .unwrap()
            .is_empty()
    );

    let report = service
        .create_user(details(&builder, "report", Some(approver.id)))
        .await
        .unwrap();

    let duplicate = service
        .create_user(details(&builder, "report", None))
        .await;
    assert!(matches!(duplicate, Err(UserError::AlreadyExists { id }) if id == report.id));

    let reports = service.list_users_by_approver(approver.id).await.unwrap();
    assert_eq!(reports, vec![report.clone()]);

    let deleted = service.delete_user(report.id).await.unwrap();
    assert_eq!(deleted, report);
    assert!(service.get_user_by_id(report.id).await.unwrap().is_none());
    assert!(matches!(
        service.delete_user(report.id).await,
        Err(UserError::NotFound(_))
    ));
}
