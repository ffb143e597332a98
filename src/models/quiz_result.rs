// src/models/quiz_result.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'results' table in the database.
/// One row per finished quiz.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: i64,
    pub username: String,
    pub topic: String,
    pub score: i64,
    pub total: i64,
    /// Local timestamp formatted as `YYYY-MM-DD HH:MM:SS` (UTC).
    pub date: String,
}

/// DTO for saving a quiz result. The owner comes from the bearer token.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = validate_score_within_total))]
pub struct SaveResultRequest {
    #[validate(length(min = 1, max = 200))]
    pub topic: String,
    #[validate(range(min = 0))]
    pub score: i64,
    #[validate(range(min = 1))]
    pub total: i64,
}

fn validate_score_within_total(req: &SaveResultRequest) -> Result<(), validator::ValidationError> {
    if req.score > req.total {
        return Err(validator::ValidationError::new("score_exceeds_total"));
    }
    Ok(())
}
