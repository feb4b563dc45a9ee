use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Require upper and lower case letters, a digit and a special character.
fn validate_password_complexity(password: &str) -> Result<(), ValidationError> {
    let checks: [(&str, &str, fn(char) -> bool); 4] = [
        (
            "password_uppercase",
            "Password must contain at least one uppercase letter",
            char::is_uppercase,
        ),
        (
            "password_lowercase",
            "Password must contain at least one lowercase letter",
            char::is_lowercase,
        ),
        (
            "password_digit",
            "Password must contain at least one digit",
            |c| c.is_ascii_digit(),
        ),
        (
            "password_special",
            "Password must contain at least one special character",
            |c| SPECIAL_CHARS.contains(c),
        ),
    ];

    for (code, message, predicate) in checks {
        if !password.chars().any(predicate) {
            return Err(ValidationError::new(code).with_message(message.into()));
        }
    }

    Ok(())
}

/// Trimmed, lowercase form under which emails are stored and looked up
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Persisted account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    /// Stored lowercase
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
    /// Permission grants copied into every issued token
    pub claims: Vec<String>,
    pub failed_login_attempts: i32,
    pub locked_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account (password must already be hashed)
    pub fn new(email: &str, password_hash: String, claims: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            email: normalize_email(email),
            password_hash,
            claims,
            failed_login_attempts: 0,
            locked_until: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The lock end when the account is locked at `now`
    pub fn locked_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.locked_until.filter(|until| *until > now)
    }
}

/// Failed-login counter and lock as stored after a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginState {
    pub failed_login_attempts: i32,
    pub locked_until: Option<DateTime<Utc>>,
}

/// Registration body
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    #[validate(email(message = "Email must be a valid address"), length(max = 255))]
    pub email: String,
    #[validate(
        length(min = 8, max = 128, message = "Password must be 8 to 128 characters"),
        custom(function = "validate_password_complexity")
    )]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

/// Login body
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Bearer token handed out by register and login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    /// Always `Bearer`
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

impl TokenResponse {
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}
