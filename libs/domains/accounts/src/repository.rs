use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AccountError, AccountResult};
use crate::models::{Account, LoginState, normalize_email};

/// Account storage used by the auth gateway
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Lookup by email, case-insensitive
    async fn find_by_email(&self, email: &str) -> AccountResult<Option<Account>>;

    async fn email_exists(&self, email: &str) -> AccountResult<bool>;

    /// Insert a new account. A taken email is [`AccountError::DuplicateEmail`].
    async fn create(&self, account: Account) -> AccountResult<Account>;

    /// Count one failed login as a single atomic step and return the stored state.
    ///
    /// A lock that expired before `now` restarts the count at 1. A live lock is
    /// kept. Otherwise the account is locked until `lock_until` once the count
    /// reaches `max_attempts`.
    async fn record_failed_login(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
        max_attempts: i32,
        lock_until: DateTime<Utc>,
    ) -> AccountResult<LoginState>;

    /// Clear the failed-login counter and any lock
    async fn reset_login_state(&self, id: Uuid) -> AccountResult<()>;
}

/// In-memory implementation of AccountRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(&self, email: &str) -> AccountResult<Option<Account>> {
        let email = normalize_email(email);
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn email_exists(&self, email: &str) -> AccountResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn create(&self, account: Account) -> AccountResult<Account> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == account.email) {
            return Err(AccountError::DuplicateEmail(account.email));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn record_failed_login(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
        max_attempts: i32,
        lock_until: DateTime<Utc>,
    ) -> AccountResult<LoginState> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(&id)
            .ok_or_else(|| AccountError::Internal(format!("Account {} not found", id)))?;

        let expired = account.locked_until.is_some_and(|until| until <= now);
        account.failed_login_attempts = if expired {
            1
        } else {
            account.failed_login_attempts.saturating_add(1)
        };
        account.locked_until = match account.locked_until {
            Some(until) if until > now => Some(until),
            _ if account.failed_login_attempts >= max_attempts => Some(lock_until),
            _ => None,
        };
        account.updated_at = Utc::now();

        Ok(LoginState {
            failed_login_attempts: account.failed_login_attempts,
            locked_until: account.locked_until,
        })
    }

    async fn reset_login_state(&self, id: Uuid) -> AccountResult<()> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(&id)
            .ok_or_else(|| AccountError::Internal(format!("Account {} not found", id)))?;

        account.failed_login_attempts = 0;
        account.locked_until = None;
        account.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn account(email: &str) -> Account {
        Account::new(email, "hash".to_string(), vec![])
    }

    #[tokio::test]
    async fn test_find_by_email_is_case_insensitive() {
        let repo = InMemoryAccountRepository::new();
        let created = repo.create(account("buyer@example.com")).await.unwrap();

        let found = repo.find_by_email("BUYER@example.com").await.unwrap();
        assert_eq!(found, Some(created));
        assert!(repo.email_exists(" buyer@EXAMPLE.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let repo = InMemoryAccountRepository::new();
        repo.create(account("buyer@example.com")).await.unwrap();

        let err = repo.create(account("Buyer@Example.com")).await.unwrap_err();
        assert!(matches!(err, AccountError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn test_record_failed_login_locks_at_threshold() {
        let repo = InMemoryAccountRepository::new();
        let created = repo.create(account("buyer@example.com")).await.unwrap();
        let now = Utc::now();
        let until = now + Duration::minutes(15);

        for expected in 1..3 {
            let state = repo.record_failed_login(created.id, now, 3, until).await.unwrap();
            assert_eq!(state.failed_login_attempts, expected);
            assert_eq!(state.locked_until, None);
        }

        let state = repo.record_failed_login(created.id, now, 3, until).await.unwrap();
        assert_eq!(state.failed_login_attempts, 3);
        assert_eq!(state.locked_until, Some(until));

        let stored = repo.find_by_email("buyer@example.com").await.unwrap().unwrap();
        assert_eq!(stored.locked_until, Some(until));
    }

    #[tokio::test]
    async fn test_record_failed_login_keeps_live_lock() {
        let repo = InMemoryAccountRepository::new();
        let created = repo.create(account("buyer@example.com")).await.unwrap();
        let now = Utc::now();
        let first_lock = now + Duration::minutes(5);

        repo.record_failed_login(created.id, now, 1, first_lock).await.unwrap();
        let state = repo
            .record_failed_login(created.id, now, 1, now + Duration::minutes(30))
            .await
            .unwrap();

        assert_eq!(state.failed_login_attempts, 2);
        assert_eq!(state.locked_until, Some(first_lock));
    }

    #[tokio::test]
    async fn test_record_failed_login_after_expired_lock_restarts_count() {
        let repo = InMemoryAccountRepository::new();
        let created = repo.create(account("buyer@example.com")).await.unwrap();
        let now = Utc::now();

        let earlier = now - Duration::minutes(20);
        repo.record_failed_login(created.id, earlier, 1, now - Duration::minutes(5))
            .await
            .unwrap();
        let state = repo
            .record_failed_login(created.id, now, 5, now + Duration::minutes(15))
            .await
            .unwrap();

        assert_eq!(state.failed_login_attempts, 1);
        assert_eq!(state.locked_until, None);
    }

    #[tokio::test]
    async fn test_concurrent_failed_logins_are_all_counted() {
        let repo = InMemoryAccountRepository::new();
        let created = repo.create(account("buyer@example.com")).await.unwrap();
        let now = Utc::now();
        let until = now + Duration::minutes(15);

        let attempts: Vec<_> = (0..20)
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

        let stored = repo.find_by_email("buyer@example.com").await.unwrap().unwrap();
        assert_eq!(stored.failed_login_attempts, 20);
    }

    #[tokio::test]
    async fn test_reset_login_state() {
        let repo = InMemoryAccountRepository::new();
        let created = repo.create(account("buyer@example.com")).await.unwrap();
        let now = Utc::now();
        repo.record_failed_login(created.id, now, 1, now + Duration::minutes(15))
            .await
            .unwrap();

        repo.reset_login_state(created.id).await.unwrap();

        let stored = repo.find_by_email("buyer@example.com").await.unwrap().unwrap();
        assert_eq!(stored.failed_login_attempts, 0);
        assert_eq!(stored.locked_until, None);
    }

    #[tokio::test]
    async fn test_login_state_unknown_account() {
        let repo = InMemoryAccountRepository::new();
        let now = Utc::now();
        assert!(repo.record_failed_login(Uuid::now_v7(), now, 5, now).await.is_err());
        assert!(repo.reset_login_state(Uuid::now_v7()).await.is_err());
    }
}
