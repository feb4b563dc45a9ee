use core_config::{ConfigError, FromEnv, env_list, env_parse};

/// Login lockout policy and the claims granted at registration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountsConfig {
    /// Consecutive failed logins that lock the account
    pub max_failed_attempts: u32,
    pub lockout_minutes: i64,
    /// Claims every new account receives, e.g. `suppliers:delete`
    pub default_claims: Vec<String>,
}

impl AccountsConfig {
    pub fn with_default_claims<I, S>(mut self, claims: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_claims = claims.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            max_failed_attempts: 5,
            lockout_minutes: 15,
            default_claims: Vec::new(),
        }
    }
}

impl FromEnv for AccountsConfig {
    /// - ACCOUNT_LOCKOUT_MAX_ATTEMPTS: defaults to 5
    /// - ACCOUNT_LOCKOUT_MINUTES: defaults to 15
    /// - ACCOUNT_DEFAULT_CLAIMS: comma separated, defaults to none
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            max_failed_attempts: env_parse("ACCOUNT_LOCKOUT_MAX_ATTEMPTS", "5")?,
            lockout_minutes: env_parse("ACCOUNT_LOCKOUT_MINUTES", "15")?,
            default_claims: env_list("ACCOUNT_DEFAULT_CLAIMS"),
        })
    }
}
