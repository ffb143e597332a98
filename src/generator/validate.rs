// src/generator/validate.rs

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::GenerationError;
use crate::models::question::{OPTIONS_PER_QUESTION, Question, QuestionSet};

static LEADING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*```[A-Za-z]*").expect("valid regex"));
static TRAILING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```\s*$").expect("valid regex"));

/// Removes a markdown code fence wrapped around the completion, if any.
pub fn strip_code_fences(content: &str) -> &str {
    let start = LEADING_FENCE.find(content).map_or(0, |m| m.end());
    let rest = &content[start..];
    let end = TRAILING_FENCE.find(rest).map_or(rest.len(), |m| m.start());
    rest[..end].trim()
}

/// Parses the completion text into questions, checking the full shape of
/// every element.
pub fn parse_questions(content: &str) -> Result<QuestionSet, GenerationError> {
    let json = strip_code_fences(content);

    let value: Value = serde_json::from_str(json)
        .map_err(|e| GenerationError::MalformedResponse(format!("content is not valid JSON: {}", e)))?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(GenerationError::MalformedResponse(format!(
                "expected a JSON array of questions, got {}",
                json_kind(&other)
            )));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| parse_question(index, item))
        .collect()
}

fn parse_question(index: usize, item: Value) -> Result<Question, GenerationError> {
    let question: Question = serde_json::from_value(item).map_err(|e| {
        GenerationError::MalformedResponse(format!("question {}: {}", index, e))
    })?;

    if question.options.len() != OPTIONS_PER_QUESTION {
        return Err(GenerationError::MalformedResponse(format!(
            "question {}: expected {} options, got {}",
            index,
            OPTIONS_PER_QUESTION,
            question.options.len()
        )));
    }

    Ok(question)
}

/// Maps a letter answer key ("A".."D", any case) onto the option text at that
/// position. Returns whether `correct` was changed.
pub fn repair_answer(question: &mut Question) -> bool {
    if question.has_consistent_answer() {
        return false;
    }

    let mut chars = question.correct.chars();
    let letter = match (chars.next(), chars.next()) {
        (Some(c), None) => c.to_ascii_uppercase(),
        _ => return false,
    };

    if !('A'..='D').contains(&letter) {
        return false;
    }

    let index = (letter as u8 - b'A') as usize;
    match question.options.get(index) {
        Some(option) => {
            question.correct = option.clone();
            true
        }
        None => false,
    }
}

/// Runs the repair heuristic over the whole set. Questions that still have
/// an answer outside their options are left as they are.
pub fn repair_answers(questions: &mut QuestionSet) {
    for (index, question) in questions.iter_mut().enumerate() {
        let original = question.correct.clone();
        if repair_answer(question) {
            tracing::debug!(
                "Repaired answer key of question {}: {:?} -> {:?}",
                index,
                original,
                question.correct
            );
        } else if !question.has_consistent_answer() {
            tracing::warn!(
                "Question {} has an answer that matches no option: {:?}",
                index,
                question.correct
            );
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(options: [&str; 4], correct: &str) -> Question {
        Question {
            question: "Which one?".to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            correct: correct.to_string(),
            explanation: "Because.".to_string(),
        }
    }

    #[test]
    fn strips_json_fence() {
        let content = "```json\n[1, 2]\n```";
        assert_eq!(strip_code_fences(content), "[1, 2]");
    }

    #[test]
    fn strips_bare_fence_and_whitespace() {
        let content = "  ```\n[]\n```  \n";
        assert_eq!(strip_code_fences(content), "[]");
    }

    #[test]
    fn leaves_unfenced_content_alone() {
        assert_eq!(strip_code_fences(" [\"a\"] "), "[\"a\"]");
    }

    #[test]
    fn letter_answer_is_replaced_by_option_text() {
        let mut q = question(["Paris", "London", "Berlin", "Madrid"], "B");
        assert!(repair_answer(&mut q));
        assert_eq!(q.correct, "London");
    }

    #[test]
    fn lowercase_letter_is_accepted() {
        let mut q = question(["Paris", "London", "Berlin", "Madrid"], "d");
        assert!(repair_answer(&mut q));
        assert_eq!(q.correct, "Madrid");
    }

    #[test]
    fn letter_outside_a_to_d_is_left_alone() {
        let mut q = question(["Paris", "London", "Berlin", "Madrid"], "E");
        assert!(!repair_answer(&mut q));
        assert_eq!(q.correct, "E");
    }

    #[test]
    fn longer_mismatch_is_left_alone() {
        let mut q = question(["Paris", "London", "Berlin", "Madrid"], "Rome");
        assert!(!repair_answer(&mut q));
        assert_eq!(q.correct, "Rome");
    }

    #[test]
    fn letter_that_is_an_option_is_not_remapped() {
        let mut q = question(["D", "C", "B", "A"], "B");
        assert!(!repair_answer(&mut q));
        assert_eq!(q.correct, "B");
    }

    #[test]
    fn repair_is_idempotent_on_valid_input() {
        let mut set = vec![
            question(["1", "2", "3", "4"], "2"),
            question(["red", "green", "blue", "grey"], "grey"),
        ];
        let before = set.clone();

        repair_answers(&mut set);
        assert_eq!(set, before);
    }

    #[test]
    fn non_array_is_malformed() {
        let err = parse_questions(r#"{"questions": []}"#).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(msg) if msg.contains("an object")));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = parse_questions("Here are your questions: [").unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[test]
    fn wrong_option_count_is_malformed() {
        let content = r#"[{"question": "q", "options": ["a", "b", "c"], "correct": "a", "explanation": "e"}]"#;
        let err = parse_questions(content).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(msg) if msg.contains("question 0")));
    }

    #[test]
    fn numeric_answer_is_malformed() {
        let content = r#"[{"question": "q", "options": ["a", "b", "c", "d"], "correct": 1, "explanation": "e"}]"#;
        assert!(parse_questions(content).is_err());
    }

    #[test]
    fn missing_explanation_is_malformed() {
        let content = r#"[{"question": "q", "options": ["a", "b", "c", "d"], "correct": "a"}]"#;
        assert!(parse_questions(content).is_err());
    }

    #[test]
    fn fenced_array_parses() {
        let content = "```json\n[{\"question\": \"q\", \"options\": [\"a\", \"b\", \"c\", \"d\"], \"correct\": \"c\", \"explanation\": \"e\"}]\n```";
        let set = parse_questions(content).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].correct, "c");
    }
}
