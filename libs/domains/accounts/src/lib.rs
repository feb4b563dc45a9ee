//! Accounts Domain
//!
//! Registration and login for API callers. A successful call returns a
//! signed bearer token carrying the account's claims.
//!
//! - Passwords are hashed with Argon2
//! - Repeated failed logins lock the account for a while
//! - Token issuing sits behind [`TokenIssuer`], implemented by
//!   [`axum_helpers::JwtAuth`]
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_accounts::{AccountService, AccountsConfig, InMemoryAccountRepository, handlers};
//!
//! let auth = JwtAuth::new(&JwtConfig::new("0123456789abcdef0123456789abcdef").unwrap());
//! let service = AccountService::new(InMemoryAccountRepository::new(), auth, AccountsConfig::default());
//! let router = handlers::router(service);
//! ```

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod token;

pub use config::AccountsConfig;
pub use error::{AccountError, AccountResult};
pub use handlers::ApiDoc;
pub use models::{Account, LoginState, LoginUser, RegisterUser, TokenResponse};
pub use postgres::PgAccountRepository;
pub use repository::{AccountRepository, InMemoryAccountRepository};
pub use service::AccountService;
pub use token::TokenIssuer;
