//! Application state management.
//!
//! Shared by route construction, the readiness probe and shutdown cleanup.

use axum_helpers::JwtAuth;

/// Shared application state.
///
/// Cloning is cheap: the connection pool and the JWT keys are reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
    /// Signs tokens on login and verifies them on protected routes
    pub jwt_auth: JwtAuth,
}
