// src/models/question.rs

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use validator::Validate;

/// Number of answer options every generated question must carry.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// A single multiple-choice question as returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text.
    pub question: String,

    /// Answer options, in display order.
    pub options: Vec<String>,

    /// The correct answer. Expected to equal one of `options` verbatim.
    pub correct: String,

    /// Why the correct answer is correct.
    pub explanation: String,
}

impl Question {
    /// Returns true when `correct` matches one of the options byte-for-byte.
    pub fn has_consistent_answer(&self) -> bool {
        self.options.iter().any(|option| option == &self.correct)
    }
}

/// Ordered list of questions making up one quiz.
pub type QuestionSet = Vec<Question>;

/// DTO for `POST /api/generate-test`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    #[validate(
        length(min = 1, max = 200, message = "Topic must be between 1 and 200 characters."),
        custom(function = not_blank, message = "Topic must not be blank.")
    )]
    pub topic: String,

    #[validate(
        length(min = 1, max = 50, message = "Difficulty must be between 1 and 50 characters."),
        custom(function = not_blank, message = "Difficulty must not be blank.")
    )]
    pub difficulty: String,

    /// Browsers post the raw `<input>` value, so a numeric string is accepted too.
    #[validate(range(min = 1, max = 50, message = "numQuestions must be between 1 and 50."))]
    #[serde(deserialize_with = "number_or_string")]
    pub num_questions: u32,
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

fn number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("numQuestions is not a number: {:?}", s))),
    }
}

/// Successful response body of `POST /api/generate-test`.
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionSetResponse {
    pub questions: QuestionSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capitals() -> Question {
        Question {
            question: "What is the capital of the UK?".to_string(),
            options: vec!["Paris", "London", "Berlin", "Madrid"]
                .into_iter()
                .map(String::from)
                .collect(),
            correct: "London".to_string(),
            explanation: "London is the capital of the United Kingdom.".to_string(),
        }
    }

    #[test]
    fn answer_consistency_is_exact_match() {
        let mut q = capitals();
        assert!(q.has_consistent_answer());

        q.correct = "london".to_string();
        assert!(!q.has_consistent_answer());
    }

    #[test]
    fn request_uses_camel_case() {
        let req: QuestionRequest = serde_json::from_value(serde_json::json!({
            "topic": "Photosynthesis",
            "difficulty": "easy",
            "numQuestions": 3
        }))
        .unwrap();

        assert_eq!(req.num_questions, 3);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn request_accepts_count_as_string() {
        let req: QuestionRequest = serde_json::from_value(serde_json::json!({
            "topic": "Rust",
            "difficulty": "medium",
            "numQuestions": "5"
        }))
        .unwrap();

        assert_eq!(req.num_questions, 5);
    }

    #[test]
    fn request_rejects_non_numeric_count() {
        let result = serde_json::from_value::<QuestionRequest>(serde_json::json!({
            "topic": "Rust",
            "difficulty": "medium",
            "numQuestions": "five"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn request_rejects_whitespace_topic() {
        let req = QuestionRequest {
            topic: "   ".to_string(),
            difficulty: "easy".to_string(),
            num_questions: 3,
        };

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("topic"));
    }

    #[test]
    fn request_rejects_empty_topic_and_zero_count() {
        let req = QuestionRequest {
            topic: String::new(),
            difficulty: "easy".to_string(),
            num_questions: 0,
        };

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("topic"));
        assert!(fields.contains_key("num_questions"));
    }
}
