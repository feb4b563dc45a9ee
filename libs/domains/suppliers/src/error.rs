use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum SupplierError {
    #[error("Supplier not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid supplier: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Missing required claim: {0}")]
    MissingClaim(&'static str),

    /// Commit succeeded but touched no rows
    #[error("No changes were persisted")]
    NotPersisted,

    /// Store rejected the commit (constraint violation, lost connection)
    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type SupplierResult<T> = Result<T, SupplierError>;

/// Convert SupplierError to AppError for standardized error responses
impl From<SupplierError> for AppError {
    fn from(err: SupplierError) -> Self {
        match err {
            SupplierError::NotFound(id) => AppError::NotFound(format!("Supplier {} not found", id)),
            SupplierError::Validation(errors) => AppError::ValidationError(errors),
            SupplierError::MissingClaim(claim) => {
                AppError::Forbidden(format!("Missing required claim: {}", claim))
            }
            SupplierError::NotPersisted => {
                AppError::BadRequest("No changes were persisted".to_string())
            }
            SupplierError::Persistence(msg) => {
                tracing::error!("Supplier commit failed: {}", msg);
                AppError::BadRequest("Changes could not be persisted".to_string())
            }
            SupplierError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for SupplierError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
