//! Shared application state.

use sea_orm::DatabaseConnection;

/// Cloned into each stateful router; the connection is a pooled handle.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: DatabaseConnection,
}
