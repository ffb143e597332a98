// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use validator::Validate;

use crate::{
    error::AppError,
    extract::AppJson,
    generator::QuestionGenerator,
    models::question::{QuestionRequest, QuestionSetResponse},
};

/// Generates a fresh quiz through the question provider.
///
/// Without a configured API key this serves the one-question fallback quiz.
/// Any provider failure becomes a 502 with the raw detail in `details`.
pub async fn generate_test(
    State(generator): State<Arc<QuestionGenerator>>,
    AppJson(req): AppJson<QuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let questions = generator
        .generate(req.topic.trim(), &req.difficulty, req.num_questions)
        .await?;

    Ok(Json(QuestionSetResponse { questions }))
}
