// src/generator/mod.rs

//! Quiz question generation through an external chat-completion provider.
//!
//! The flow per call is: build prompt, one outbound request, parse the
//! completion as a JSON array, validate each question's shape, repair letter
//! answer keys. Without an API key a fixed fallback quiz is returned instead.

pub mod prompt;
pub mod provider;
pub mod validate;

use std::sync::Arc;

use thiserror::Error;

use crate::{
    config::GeneratorConfig,
    models::question::{Question, QuestionSet},
};
use provider::{ChatClient, ChatMessage, ChatRequest, HttpChatClient};

/// Ways a generation call can fail. A missing API key is not one of them.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The provider answered with a non-2xx status.
    #[error("provider returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The provider's payload is not the agreed JSON shape.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// The request never completed (DNS, connect, timeout, body read).
    #[error("request to provider failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// The placeholder quiz served when no provider credential is configured.
pub fn fallback_questions() -> QuestionSet {
    vec![Question {
        question: "What is 2+2 (Fallback)?".to_string(),
        options: vec!["3", "4", "5", "6"].into_iter().map(String::from).collect(),
        correct: "4".to_string(),
        explanation: "No API key configured on the server.".to_string(),
    }]
}

/// Generates validated quiz questions.
///
/// Holds only immutable settings and a shareable HTTP client, so one instance
/// can serve any number of concurrent requests.
#[derive(Clone)]
pub struct QuestionGenerator {
    config: GeneratorConfig,
    client: Option<Arc<dyn ChatClient>>,
}

impl QuestionGenerator {
    /// Creates a generator talking to the configured provider over HTTP.
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerationError> {
        let client = match &config.api_key {
            Some(key) => {
                let http = HttpChatClient::new(&config, key.clone())?;
                Some(Arc::new(http) as Arc<dyn ChatClient>)
            }
            None => None,
        };

        Ok(Self { config, client })
    }

    /// Creates a generator with a caller-supplied client. The client is
    /// ignored when the config carries no API key.
    pub fn with_client(config: GeneratorConfig, client: Arc<dyn ChatClient>) -> Self {
        let client = config.api_key.as_ref().map(|_| client);
        Self { config, client }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Builds the chat request for one quiz.
    pub fn build_request(&self, topic: &str, difficulty: &str, num_questions: u32) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(prompt::SYSTEM_INSTRUCTION),
                ChatMessage::user(prompt::user_prompt(topic, difficulty, num_questions)),
            ],
            temperature: self.config.temperature,
        }
    }

    /// Generates `num_questions` questions about `topic`.
    ///
    /// The returned set is not trimmed or padded when the provider returns a
    /// different number of questions than requested.
    pub async fn generate(
        &self,
        topic: &str,
        difficulty: &str,
        num_questions: u32,
    ) -> Result<QuestionSet, GenerationError> {
        let Some(client) = &self.client else {
            tracing::info!("No provider API key configured, serving fallback quiz");
            return Ok(fallback_questions());
        };

        let request = self.build_request(topic, difficulty, num_questions);

        tracing::info!(
            "Requesting {} {} questions about {:?} from {}",
            num_questions,
            difficulty,
            topic,
            self.config.model
        );

        let content = client.complete(&request).await?;

        let mut questions = validate::parse_questions(&content)?;
        validate::repair_answers(&mut questions);

        if questions.len() != num_questions as usize {
            tracing::warn!(
                "Provider returned {} questions, {} were requested",
                questions.len(),
                num_questions
            );
        }

        Ok(questions)
    }
}
