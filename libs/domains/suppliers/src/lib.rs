//! Suppliers Domain
//!
//! CRUD over supplier records with declarative validation and a staged
//! persistence gateway.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, auth, audit
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation gate, commit checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Reads + ChangeSet commit (in-memory or Postgres)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Supplier, SupplierPayload
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_suppliers::{InMemorySupplierRepository, SupplierService, handlers};
//!
//! let auth = JwtAuth::new(&JwtConfig::new("0123456789abcdef0123456789abcdef").unwrap());
//! let service = SupplierService::new(InMemorySupplierRepository::new());
//! let router = handlers::router(service, auth);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod unit_of_work;
pub mod validation;

pub use error::{SupplierError, SupplierResult};
pub use handlers::ApiDoc;
pub use models::{Supplier, SupplierPayload};
pub use postgres::PgSupplierRepository;
pub use repository::{InMemorySupplierRepository, SupplierRepository};
pub use service::{DELETE_CLAIM, SupplierService};
pub use unit_of_work::{Change, ChangeSet};
pub use validation::{Validated, validate};
