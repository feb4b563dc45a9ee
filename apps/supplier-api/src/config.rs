use axum_helpers::{CorsConfig, JwtConfig};
use core_config::{AppInfo, FromEnv, app_info, env_parse, server::ServerConfig};
use database::postgres::PostgresConfig;
use domain_accounts::AccountsConfig;

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
    pub accounts: AccountsConfig,
    pub environment: Environment,
    /// Apply pending migrations before serving (`DB_RUN_MIGRATIONS`, default true)
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - will fail if not set
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let jwt = JwtConfig::from_env()?; // JWT_SECRET is required
        let cors = CorsConfig::from_env()?; // CORS_ALLOWED_ORIGIN is required
        let accounts = AccountsConfig::from_env()?;
        let run_migrations = env_parse("DB_RUN_MIGRATIONS", "true")?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            jwt,
            cors,
            accounts,
            environment,
            run_migrations,
        })
    }
}
