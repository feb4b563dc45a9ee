use axum_helpers::JwtAuth;

use crate::error::{AccountError, AccountResult};
use crate::models::{Account, TokenResponse};

/// Issues the bearer token returned by register and login
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, account: &Account) -> AccountResult<TokenResponse>;
}

impl TokenIssuer for JwtAuth {
    fn issue(&self, account: &Account) -> AccountResult<TokenResponse> {
        let token = self
            .create_access_token(&account.id.to_string(), &account.email, &account.claims)
            .map_err(|e| AccountError::Token(e.to_string()))?;

        Ok(TokenResponse::bearer(token, self.expiry_secs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_helpers::JwtConfig;

    #[test]
    fn test_jwt_auth_issues_verifiable_token() {
        let auth = JwtAuth::new(&JwtConfig::new("token-test-secret-0123456789abcdef").unwrap());
        let account = Account::new(
            "buyer@example.com",
            "hash".to_string(),
            vec!["suppliers:delete".to_string()],
        );

        let response = auth.issue(&account).unwrap();
        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 3600);

        let claims = auth.verify_token(&response.access_token).unwrap();
        assert_eq!(claims.sub, account.id.to_string());
        assert_eq!(claims.email, "buyer@example.com");
        assert!(claims.has_claim("suppliers:delete"));
    }
}
