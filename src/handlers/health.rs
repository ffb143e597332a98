// src/handlers/health.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;
use sqlx::SqlitePool;

/// Liveness probe that also reports whether the database answers.
pub async fn health_check(State(pool): State<SqlitePool>) -> impl IntoResponse {
    let database = match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => "connected",
        Err(e) => {
            tracing::warn!("Health check could not reach the database: {:?}", e);
            "disconnected"
        }
    };

    Json(json!({
        "status": "ok",
        "database": database
    }))
}
