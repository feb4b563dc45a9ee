//! Integration tests for the Accounts domain
//!
//! These tests use real PostgreSQL via testcontainers.
//! Run with `cargo test -- --ignored` on a machine with Docker.

use chrono::{Duration, Utc};
use domain_accounts::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_find_account() {
    let db = TestDatabase::new().await;
    let repo = PgAccountRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_find_account");
    let email = builder.email("buyer");

    let account = Account::new(&email, "hash".to_string(), vec!["suppliers:delete".to_string()]);
    let created = repo.create(account.clone()).await.unwrap();
    assert_uuid_eq(created.id, account.id, "created account id");

    let found = assert_some(
        repo.find_by_email(&email.to_uppercase()).await.unwrap(),
        "account should exist",
    );
    assert_eq!(found.claims, vec!["suppliers:delete".to_string()]);
    assert!(repo.email_exists(&email).await.unwrap());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_email_is_rejected() {
    let db = TestDatabase::new().await;
    let repo = PgAccountRepository::new(db.connection());
    let email = TestDataBuilder::from_test_name("duplicate_email").email("buyer");

    repo.create(Account::new(&email, "hash".to_string(), vec![]))
        .await
        .unwrap();
    let err = repo
        .create(Account::new(&email, "hash".to_string(), vec![]))
        .await
        .unwrap_err();

    assert!(matches!(err, AccountError::DuplicateEmail(_)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_failed_logins_lock_and_reset() {
    let db = TestDatabase::new().await;
    let repo = PgAccountRepository::new(db.connection());
    let email = TestDataBuilder::from_test_name("login_state").email("buyer");

    let created = repo
        .create(Account::new(&email, "hash".to_string(), vec![]))
        .await
        .unwrap();
    let now = Utc::now();
    let until = now + Duration::minutes(15);

    let state = repo.record_failed_login(created.id, now, 2, until).await.unwrap();
    assert_eq!(state.failed_login_attempts, 1);
    assert_eq!(state.locked_until, None);

    let state = repo.record_failed_login(created.id, now, 2, until).await.unwrap();
    assert_eq!(state.failed_login_attempts, 2);
    // Postgres keeps microseconds
    let stored_until = state.locked_until.unwrap();
    assert!((stored_until - until).num_milliseconds().abs() < 1);

    repo.reset_login_state(created.id).await.unwrap();
    let stored = repo.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(stored.failed_login_attempts, 0);
    assert_eq!(stored.locked_until, None);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_concurrent_failed_logins_are_all_counted() {
    let db = TestDatabase::new().await;
    let repo = PgAccountRepository::new(db.connection());
    let email = TestDataBuilder::from_test_name("concurrent_failures").email("buyer");

    let created = repo
        .create(Account::new(&email, "hash".to_string(), vec![]))
        .await
        .unwrap();
    let now = Utc::now();
    let until = now + Duration::minutes(15);

    let attempts: Vec<_> = (0..10)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.record_failed_login(created.id, now, 100, until).await
            })
        })
        .collect();
    for attempt in attempts {
        attempt.await.unwrap().unwrap();
    }

    let stored = repo.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(stored.failed_login_attempts, 10);
}
