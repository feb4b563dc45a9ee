use axum::Router;
use axum_helpers::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

/// Compose the API, docs, health and readiness routes
fn build_app(state: &AppState) -> eyre::Result<Router> {
    // create_router adds docs/middleware to our composed routes
    let router = create_router::<openapi::ApiDoc>(api::routes(state), &state.config.cors)?;

    // - /health: liveness check with app name/version
    // - /ready: readiness check with an actual database round trip
    Ok(router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone())))
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    if config.run_migrations {
        database::postgres::run_migrations::<migration::Migrator>(&db, config.app.name)
            .await
            .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;
    }

    let jwt_auth = axum_helpers::JwtAuth::new(&config.jwt);

    let state = AppState {
        config,
        db,
        jwt_auth,
    };

    let app = build_app(&state)?;

    info!("Starting supplier API with production-ready shutdown (30s timeout)");

    let AppState { config, db, .. } = state;

    // db moves into the cleanup future
    create_production_app(
        app,
        &config.server,
        Duration::from_secs(30), // 30s graceful shutdown timeout
        async move {
            info!("Shutting down: closing database connections");
            match db.close().await {
                Ok(_) => info!("PostgreSQL connection closed successfully"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Supplier API shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum_helpers::{CorsConfig, JwtConfig};
    use core_config::{app_info, server::ServerConfig};
    use database::postgres::PostgresConfig;
    use domain_accounts::AccountsConfig;
    use domain_suppliers::entity;
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use serde_json::Value;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn state(db: DatabaseConnection) -> AppState {
        let jwt = JwtConfig::new("app-test-secret-0123456789abcdef-xyz").unwrap();
        AppState {
            config: Config {
                app: app_info!(),
                database: PostgresConfig::new("postgresql://localhost/suppliers"),
                server: ServerConfig::default(),
                jwt: jwt.clone(),
                cors: CorsConfig::new(["http://localhost:3000"]),
                accounts: AccountsConfig::default(),
                environment: config::Environment::Development,
                run_migrations: false,
            },
            db,
            jwt_auth: axum_helpers::JwtAuth::new(&jwt),
        }
    }

    fn empty_db() -> DatabaseConnection {
        MockDatabase::new(DatabaseBackend::Postgres).into_connection()
    }

    async fn json_body(body: Body) -> Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_served_at_root() {
        let app = build_app(&state(empty_db())).unwrap();

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["name"], "supplier_api");
    }

    #[tokio::test]
    async fn test_list_suppliers_under_api_prefix() {
        let row = entity::Model {
            id: Uuid::now_v7(),
            name: "Acme".to_string(),
            document: "123".to_string(),
            is_active: true,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row.clone()]])
            .into_connection();
        let app = build_app(&state(db)).unwrap();

        let response = app
            .oneshot(Request::builder().uri("/api/supplier").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(body[0]["id"], row.id.to_string());
        assert_eq!(body[0]["isActive"], true);
    }

    #[tokio::test]
    async fn test_create_supplier_without_token_is_401() {
        let app = build_app(&state(empty_db())).unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/supplier")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"name":"Acme","document":"123"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["error"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let app = build_app(&state(empty_db())).unwrap();

        let response = app
            .oneshot(Request::builder().uri("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_openapi_document_includes_supplier_paths() {
        let app = build_app(&state(empty_db())).unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert!(body["paths"]["/supplier/{id}"].is_object());
        assert!(body["components"]["securitySchemes"]["bearerAuth"].is_object());
    }
}
