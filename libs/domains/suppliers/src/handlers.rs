use axum::{
    Json, Router,
    extract::{OriginalUri, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, AuthUser, JsonBody, JwtAuth, UuidPath,
    errors::responses::{
        BadRequestPersistenceResponse, BadRequestUuidResponse, BadRequestValidationResponse,
        ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    jwt_auth_middleware,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::{SupplierError, SupplierResult};
use crate::models::{Supplier, SupplierPayload};
use crate::repository::SupplierRepository;
use crate::service::{DELETE_CLAIM, SupplierService};

pub const SUPPLIER_TAG: &str = "suppliers";

/// OpenAPI documentation for the Supplier API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_suppliers,
        create_supplier,
        get_supplier,
        update_supplier,
        delete_supplier,
    ),
    components(
        schemas(Supplier, SupplierPayload),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestPersistenceResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = SUPPLIER_TAG, description = "Supplier management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the supplier router.
///
/// Reads are public. Writes go through [`jwt_auth_middleware`], and delete
/// additionally needs the [`DELETE_CLAIM`] claim.
pub fn router<R: SupplierRepository + 'static>(service: SupplierService<R>, auth: JwtAuth) -> Router {
    let public: Router<Arc<SupplierService<R>>> = Router::new()
        .route("/", get(list_suppliers))
        .route("/{id}", get(get_supplier));

    let protected: Router<Arc<SupplierService<R>>> = Router::new()
        .route("/", post(create_supplier))
        .route("/{id}", put(update_supplier).delete(delete_supplier))
        .route_layer(middleware::from_fn_with_state(auth, jwt_auth_middleware));

    public.merge(protected).with_state(Arc::new(service))
}

fn audit<T>(
    user: &AuthUser,
    action: &str,
    id: Uuid,
    result: &SupplierResult<T>,
    headers: &HeaderMap,
) {
    let event = AuditEvent::new(
        Some(user.id().to_string()),
        action,
        Some(format!("supplier:{}", id)),
        match result {
            Ok(_) => AuditOutcome::Success,
            Err(_) => AuditOutcome::Failure,
        },
    )
    .with_request(headers);

    match result {
        Ok(_) => event.log(),
        Err(e) => event.with_details(json!({ "error": e.to_string() })).log(),
    }
}

/// List all suppliers
#[utoipa::path(
    get,
    path = "",
    tag = SUPPLIER_TAG,
    responses(
        (status = 200, description = "List of suppliers", body = Vec<Supplier>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_suppliers<R: SupplierRepository>(
    State(service): State<Arc<SupplierService<R>>>,
) -> SupplierResult<Json<Vec<Supplier>>> {
    let suppliers = service.list_suppliers().await?;
    Ok(Json(suppliers))
}

/// Create a supplier
///
/// The id from the body is used when present, otherwise one is generated.
#[utoipa::path(
    post,
    path = "",
    tag = SUPPLIER_TAG,
    request_body = SupplierPayload,
    security(("bearerAuth" = [])),
    responses(
        (status = 201, description = "Supplier created", body = Supplier,
            headers(("Location" = String, description = "URI of the new supplier"))),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_supplier<R: SupplierRepository>(
    State(service): State<Arc<SupplierService<R>>>,
    OriginalUri(uri): OriginalUri,
    user: AuthUser,
    headers: HeaderMap,
    JsonBody(payload): JsonBody<SupplierPayload>,
) -> SupplierResult<impl IntoResponse> {
    let attempted_id = payload.id.unwrap_or_default();
    let result = service.create_supplier(payload).await;
    audit(
        &user,
        "supplier.create",
        result.as_ref().map_or(attempted_id, |s| s.id),
        &result,
        &headers,
    );
    let supplier = result?;

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), supplier.id);
    let location =
        HeaderValue::from_str(&location).map_err(|e| SupplierError::Internal(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(supplier),
    ))
}

/// Get a supplier by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = SUPPLIER_TAG,
    params(
        ("id" = Uuid, Path, description = "Supplier ID")
    ),
    responses(
        (status = 200, description = "Supplier found", body = Supplier),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_supplier<R: SupplierRepository>(
    State(service): State<Arc<SupplierService<R>>>,
    UuidPath(id): UuidPath,
) -> SupplierResult<Json<Supplier>> {
    let supplier = service.get_supplier(id).await?;
    Ok(Json(supplier))
}

/// Replace a supplier
#[utoipa::path(
    put,
    path = "/{id}",
    tag = SUPPLIER_TAG,
    params(
        ("id" = Uuid, Path, description = "Supplier ID")
    ),
    request_body = SupplierPayload,
    security(("bearerAuth" = [])),
    responses(
        (status = 204, description = "Supplier updated"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_supplier<R: SupplierRepository>(
    State(service): State<Arc<SupplierService<R>>>,
    user: AuthUser,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    JsonBody(payload): JsonBody<SupplierPayload>,
) -> SupplierResult<impl IntoResponse> {
    let result = service.update_supplier(id, payload).await;
    audit(&user, "supplier.update", id, &result, &headers);
    result?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a supplier
///
/// Requires the `suppliers:delete` claim.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = SUPPLIER_TAG,
    params(
        ("id" = Uuid, Path, description = "Supplier ID")
    ),
    security(("bearerAuth" = [])),
    responses(
        (status = 204, description = "Supplier deleted"),
        (status = 400, response = BadRequestPersistenceResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_supplier<R: SupplierRepository>(
    State(service): State<Arc<SupplierService<R>>>,
    user: AuthUser,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> SupplierResult<impl IntoResponse> {
    if !user.has_claim(DELETE_CLAIM) {
        AuditEvent::new(
            Some(user.id().to_string()),
            "supplier.delete",
            Some(format!("supplier:{}", id)),
            AuditOutcome::Denied,
        )
        .with_request(&headers)
        .with_details(json!({ "missing_claim": DELETE_CLAIM }))
        .log();

        return Err(SupplierError::MissingClaim(DELETE_CLAIM));
    }

    let result = service.delete_supplier(id).await;
    audit(&user, "supplier.delete", id, &result, &headers);
    result?;

    Ok(StatusCode::NO_CONTENT)
}
