//! Authentication and authorization.
//!
//! - [`JwtAuth`]: HS256 token issuing and verification
//! - [`jwt_auth_middleware`]: rejects unauthenticated requests with 401
//! - [`AuthUser`] / [`has_claim`]: claim checks inside handlers
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let protected = Router::new()
//!     .route("/", post(create))
//!     .route_layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
//! ```

pub mod claims;
pub mod config;
pub mod jwt;
pub mod middleware;

pub use claims::{AuthUser, has_claim};
pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims};
pub use middleware::jwt_auth_middleware;
