// ABOUTME: Health and status endpoints for the Atelier server
// ABOUTME: Status also checks that the database answers

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::error;

use atelier_taxonomy::DbState;

pub const SERVICE_NAME: &str = "atelier";

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().timestamp(),
        "version": env!("CARGO_PKG_VERSION"),
        "service": SERVICE_NAME
    }))
}

pub async fn status_check(State(db): State<DbState>) -> (StatusCode, Json<Value>) {
    let database = match sqlx::query("SELECT 1").execute(&db.pool).await {
        Ok(_) => "connected",
        Err(e) => {
            error!("Database status check failed: {}", e);
            "unavailable"
        }
    };

    let status = if database == "connected" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if status.is_success() { "healthy" } else { "degraded" },
            "timestamp": Utc::now().timestamp(),
            "version": env!("CARGO_PKG_VERSION"),
            "service": SERVICE_NAME,
            "database": database
        })),
    )
}
