//! JWT configuration, loaded the same way as every other `FromEnv` config.

use core_config::{ConfigError, FromEnv, env_or_default, env_parse, env_required};

const MIN_SECRET_LEN: usize = 32;

/// JWT signing and validation settings.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required) - at least 32 characters
/// - `JWT_ISSUER` (default: `supplier-api`)
/// - `JWT_AUDIENCE` (default: `supplier-api`)
/// - `JWT_EXPIRY_SECS` (default: 3600)
///
/// # Example
///
/// ```ignore
/// use axum_helpers::JwtConfig;
/// use core_config::FromEnv;
///
/// let config = JwtConfig::from_env()?;
/// let config = JwtConfig::new("my-super-secret-key-that-is-at-least-32-chars")?;
/// ```
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    /// Access token lifetime
    pub expiry_secs: i64,
}

impl JwtConfig {
    /// Config with the given secret and default issuer, audience and expiry.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        check_secret(&secret)?;

        Ok(Self {
            secret,
            issuer: "supplier-api".to_string(),
            audience: "supplier-api".to_string(),
            expiry_secs: 3600,
        })
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    pub fn with_expiry_secs(mut self, expiry_secs: i64) -> Self {
        self.expiry_secs = expiry_secs;
        self
    }
}

fn check_secret(secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::ParseError {
            key: "JWT_SECRET".to_string(),
            details: format!(
                "must be at least {} characters for security (got {}). Generate one with: openssl rand -base64 32",
                MIN_SECRET_LEN,
                secret.len()
            ),
        });
    }
    Ok(())
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;
        check_secret(&secret)?;

        Ok(Self {
            secret,
            issuer: env_or_default("JWT_ISSUER", "supplier-api"),
            audience: env_or_default("JWT_AUDIENCE", "supplier-api"),
            expiry_secs: env_parse("JWT_EXPIRY_SECS", "3600")?,
        })
    }
}
