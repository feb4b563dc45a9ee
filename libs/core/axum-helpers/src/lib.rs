//! # Axum Helpers
//!
//! Shared HTTP plumbing for the supplier API.
//!
//! ## Modules
//!
//! - **[`auth`]**: JWT issuing/verification, auth middleware, claim checks
//! - **[`server`]**: Router assembly, health checks, graceful shutdown
//! - **[`http`]**: CORS configuration and security headers
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: UUID path, JSON body and validated JSON extractors
//! - **[`audit`]**: Audit logging for data modifications and logins
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::{CorsConfig, create_production_app, create_router};
//! use core_config::{FromEnv, server::ServerConfig};
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let router = create_router::<ApiDoc>(Router::new(), &CorsConfig::from_env()?)?;
//! create_production_app(router, &ServerConfig::default(), timeout, async {}).await?;
//! ```

pub mod audit;
pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{AuthUser, JwtAuth, JwtClaims, JwtConfig, has_claim, jwt_auth_middleware};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};

pub use http::{CorsConfig, create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{JsonBody, UuidPath, ValidatedJson};

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
