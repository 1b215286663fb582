use axum::Router;
use domain_users::{handlers, PgUserRepository, UserService};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgUserRepository::new(state.db.clone());
    handlers::router(UserService::new(repository))
}
