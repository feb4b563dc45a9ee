use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::config::AccountsConfig;
use crate::error::{AccountError, AccountResult};
use crate::models::{Account, LoginUser, RegisterUser, TokenResponse, normalize_email};
use crate::repository::AccountRepository;
use crate::token::TokenIssuer;

/// Registration and login.
///
/// Inputs are validated by the handler before they get here.
pub struct AccountService<R: AccountRepository, T: TokenIssuer> {
    repository: Arc<R>,
    tokens: Arc<T>,
    config: AccountsConfig,
}

impl<R: AccountRepository, T: TokenIssuer> AccountService<R, T> {
    pub fn new(repository: R, tokens: T, config: AccountsConfig) -> Self {
        Self {
            repository: Arc::new(repository),
            tokens: Arc::new(tokens),
            config,
        }
    }

    /// Create the account and sign the caller in
    pub async fn register(&self, input: RegisterUser) -> AccountResult<TokenResponse> {
        let email = normalize_email(&input.email);

        if self.repository.email_exists(&email).await? {
            return Err(AccountError::DuplicateEmail(email));
        }

        let password_hash = hash_password(&input.password)?;
        let account = Account::new(&email, password_hash, self.config.default_claims.clone());
        let account = self.repository.create(account).await?;

        tracing::info!(account_id = %account.id, "Registered account");
        self.tokens.issue(&account)
    }

    /// Check credentials and apply the lockout policy
    pub async fn login(&self, input: LoginUser) -> AccountResult<TokenResponse> {
        let account = self
            .repository
            .find_by_email(&input.email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let now = Utc::now();
        if let Some(until) = account.locked_at(now) {
            tracing::info!(account_id = %account.id, %until, "Login attempt on locked account");
            return Err(AccountError::Locked(until));
        }

        if !verify_password(&input.password, &account.password_hash)? {
            let lock_until = now + Duration::minutes(self.config.lockout_minutes);
            let state = self
                .repository
                .record_failed_login(account.id, now, self.max_attempts(), lock_until)
                .await?;

            if let Some(until) = state.locked_until {
                tracing::warn!(
                    account_id = %account.id,
                    attempts = state.failed_login_attempts,
                    %until,
                    "Account locked"
                );
            }
            return Err(AccountError::InvalidCredentials);
        }

        if account.failed_login_attempts != 0 || account.locked_until.is_some() {
            self.repository.reset_login_state(account.id).await?;
        }

        self.tokens.issue(&account)
    }

    fn max_attempts(&self) -> i32 {
        i32::try_from(self.config.max_failed_attempts).unwrap_or(i32::MAX)
    }
}

fn hash_password(password: &str) -> AccountResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AccountError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> AccountResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AccountError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
