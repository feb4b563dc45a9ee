use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,         // Subject (account ID)
    pub email: String,       // Account email
    pub claims: Vec<String>, // Permission grants, e.g. "suppliers:delete"
    pub iss: String,         // Issuer
    pub aud: String,         // Audience
    pub exp: i64,            // Expiration time
    pub iat: i64,            // Issued at
    pub jti: String,         // JWT ID
}

impl JwtClaims {
    pub fn has_claim(&self, claim: &str) -> bool {
        self.claims.iter().any(|c| c == claim)
    }
}

/// Stateless HS256 token issuing and verification.
#[derive(Clone)]
pub struct JwtAuth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    expiry_secs: i64,
}

impl JwtAuth {
    /// ```ignore
    /// use axum_helpers::{JwtAuth, JwtConfig};
    /// use core_config::FromEnv;
    ///
    /// let jwt_auth = JwtAuth::new(&JwtConfig::from_env()?);
    /// ```
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);

        tracing::info!(issuer = %config.issuer, "JWT auth initialized");

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            expiry_secs: config.expiry_secs,
        }
    }

    /// Lifetime of issued access tokens in seconds
    pub fn expiry_secs(&self) -> i64 {
        self.expiry_secs
    }

    /// Create an access token for an account
    pub fn create_access_token(
        &self,
        account_id: &str,
        email: &str,
        claims: &[String],
    ) -> eyre::Result<String> {
        self.create_token(account_id, email, claims, self.expiry_secs)
    }

    fn create_token(
        &self,
        account_id: &str,
        email: &str,
        claims: &[String],
        ttl_seconds: i64,
    ) -> eyre::Result<String> {
        let now = Utc::now();

        let claims = JwtClaims {
            sub: account_id.to_string(),
            email: email.to_string(),
            claims: claims.to_vec(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Verify signature, expiry, issuer and audience, then decode claims
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }
}
