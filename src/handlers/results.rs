// src/handlers/results.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    extract::AppJson,
    models::quiz_result::{QuizResult, SaveResultRequest},
    utils::jwt::Claims,
};

/// Stores a finished quiz for the authenticated user.
pub async fn save_result(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    AppJson(req): AppJson<SaveResultRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let date = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

    sqlx::query(
        r#"
        INSERT INTO results (username, topic, score, total, date)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&claims.sub)
    .bind(&req.topic)
    .bind(req.score)
    .bind(req.total)
    .bind(&date)
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to save result: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(json!({ "success": true })))
}

/// Lists the authenticated user's results, newest first.
pub async fn list_results(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let results = sqlx::query_as::<_, QuizResult>(
        r#"
        SELECT id, username, topic, score, total, date
        FROM results
        WHERE username = ?
        ORDER BY id DESC
        "#,
    )
    .bind(&claims.sub)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch results: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(results))
}
