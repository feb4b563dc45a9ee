use axum::{Json, Router, extract::State, http::HeaderMap, routing::post};
use axum_helpers::{
    AuditEvent, AuditOutcome, ValidatedJson,
    errors::responses::{BadRequestValidationResponse, InternalServerErrorResponse},
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::AccountResult;
use crate::models::{LoginUser, RegisterUser, TokenResponse, normalize_email};
use crate::repository::AccountRepository;
use crate::service::AccountService;
use crate::token::TokenIssuer;

pub const ACCOUNT_TAG: &str = "accounts";

/// OpenAPI documentation for registration and login
#[derive(OpenApi)]
#[openapi(
    paths(register, login),
    components(
        schemas(RegisterUser, LoginUser, TokenResponse),
        responses(BadRequestValidationResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = ACCOUNT_TAG, description = "Registration and login")
    )
)]
pub struct ApiDoc;

/// Create the accounts router (`/register`, `/login`)
pub fn router<R, T>(service: AccountService<R, T>) -> Router
where
    R: AccountRepository + 'static,
    T: TokenIssuer + 'static,
{
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(Arc::new(service))
}

fn audit<V>(action: &str, email: &str, result: &AccountResult<V>, headers: &HeaderMap) {
    let outcome = match result {
        Ok(_) => AuditOutcome::Success,
        Err(_) => AuditOutcome::Failure,
    };

    let mut event = AuditEvent::new(
        None,
        action,
        Some(format!("account:{}", normalize_email(email))),
        outcome,
    )
    .with_request(headers);

    if let Err(e) = result {
        event = event.with_details(json!({ "error": e.to_string() }));
    }

    event.log();
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/register",
    tag = ACCOUNT_TAG,
    request_body = RegisterUser,
    responses(
        (status = 200, description = "Account created, token issued", body = TokenResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: AccountRepository, T: TokenIssuer>(
    State(service): State<Arc<AccountService<R, T>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<RegisterUser>,
) -> AccountResult<Json<TokenResponse>> {
    let email = input.email.clone();
    let result = service.register(input).await;
    audit("account.register", &email, &result, &headers);

    Ok(Json(result?))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/login",
    tag = ACCOUNT_TAG,
    request_body = LoginUser,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid credentials, locked account or invalid input"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: AccountRepository, T: TokenIssuer>(
    State(service): State<Arc<AccountService<R, T>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<LoginUser>,
) -> AccountResult<Json<TokenResponse>> {
    let email = input.email.clone();
    let result = service.login(input).await;
    audit("account.login", &email, &result, &headers);

    Ok(Json(result?))
}
