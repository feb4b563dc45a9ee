use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the `bearerAuth` scheme referenced by protected endpoints
struct SecurityAddon;

/// Adds `/register` and `/login`, which live at the API root
struct AccountsAddon;

impl Modify for AccountsAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.merge(domain_accounts::ApiDoc::openapi());
    }
}

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse, axum_helpers::HealthResponse)
    ),
    info(
        title = "Supplier API",
        version = "0.1.0",
        description = "Supplier registry with JWT-protected writes"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/supplier", api = domain_suppliers::ApiDoc)
    ),
    modifiers(&AccountsAddon, &SecurityAddon)
)]
pub struct ApiDoc;
