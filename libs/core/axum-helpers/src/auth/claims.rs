//! Claim checks at the handler boundary.

use super::jwt::JwtClaims;
use crate::errors::AppError;
use axum::{
    extract::FromRequestParts,
    http::{Extensions, request::Parts},
};

/// Authenticated caller, as inserted by [`super::jwt_auth_middleware`].
///
/// Rejects with 401 when the route is not behind the middleware or the
/// request carried no valid token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub JwtClaims);

impl AuthUser {
    pub fn id(&self) -> &str {
        &self.0.sub
    }

    pub fn has_claim(&self, claim: &str) -> bool {
        self.0.has_claim(claim)
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<JwtClaims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

/// True when the request's verified token grants `claim`.
pub fn has_claim(extensions: &Extensions, claim: &str) -> bool {
    extensions
        .get::<JwtClaims>()
        .is_some_and(|claims| claims.has_claim(claim))
}
