//! Custom extractors for Axum handlers.
//!
//! Every rejection is an [`crate::AppError`], so malformed input renders the
//! same `ErrorResponse` body as domain failures.

pub mod json_body;
pub mod uuid_path;
pub mod validated_json;

pub use json_body::JsonBody;
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
