//! HTTP-level middleware: CORS and security headers.
//!
//! ```ignore
//! use axum_helpers::http::{CorsConfig, create_cors_layer, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(create_cors_layer(&CorsConfig::from_env()?)?);
//! ```

pub mod cors;
pub mod security;

pub use cors::{CorsConfig, create_cors_layer};
pub use security::security_headers;
