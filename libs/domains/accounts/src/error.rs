use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use chrono::{DateTime, Utc};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("An account with email '{0}' already exists")]
    DuplicateEmail(String),

    /// Unknown email and wrong password are deliberately indistinguishable
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is locked until {}", .0.to_rfc3339())]
    Locked(DateTime<Utc>),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AccountResult<T> = Result<T, AccountError>;

/// Every caller-facing failure of the auth gateway is a 400.
impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Validation(errors) => AppError::ValidationError(errors),
            AccountError::DuplicateEmail(_)
            | AccountError::InvalidCredentials
            | AccountError::Locked(_) => AppError::BadRequest(err.to_string()),
            AccountError::PasswordHash(msg) => {
                tracing::error!("Password hash error: {}", msg);
                AppError::InternalServerError(msg)
            }
            AccountError::Token(msg) | AccountError::Internal(msg) => {
                AppError::InternalServerError(msg)
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
