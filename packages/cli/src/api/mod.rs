use axum::{routing::get, Router};

use atelier_taxonomy::DbState;

pub mod health;

/// Taxonomy API plus the server's own health routes
pub fn create_router(db: DbState) -> Router {
    let health = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/status", get(health::status_check))
        .with_state(db.clone());

    atelier_api::create_api_router(db).merge(health)
}
