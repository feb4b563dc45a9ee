use axum::Router;
use domain_accounts::{AccountService, PgAccountRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgAccountRepository::new(state.db.clone());
    let service = AccountService::new(
        repository,
        state.jwt_auth.clone(),
        state.config.accounts.clone(),
    );
    handlers::router(service)
}
