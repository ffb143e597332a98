// src/config.rs

use std::{env, time::Duration};

use dotenvy::dotenv;
use url::Url;

pub const DEFAULT_LLM_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_LLM_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;

/// Settings for the question generator.
///
/// Built once at startup and handed to `QuestionGenerator::new`, so tests can
/// point it at a fake provider or leave the key out entirely.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Provider credential. `None` switches the generator to the fallback quiz.
    pub api_key: Option<String>,
    pub endpoint: Url,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl GeneratorConfig {
    /// Default provider settings with the given credential.
    pub fn with_api_key(api_key: Option<String>) -> Self {
        Self {
            api_key: normalize_key(api_key),
            endpoint: Url::parse(DEFAULT_LLM_ENDPOINT).expect("default endpoint is a valid URL"),
            model: DEFAULT_LLM_MODEL.to_string(),
            temperature: DEFAULT_LLM_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub port: u16,
    pub static_dir: String,
    pub rust_log: String,
    pub generator: GeneratorConfig,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://database.sqlite?mode=rwc".to_string());

        let jwt_secret = env::var("JWT_SECRET")
            .expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86_400);

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        let static_dir = env::var("STATIC_DIR")
            .unwrap_or_else(|_| "public".to_string());

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let endpoint = env::var("LLM_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_LLM_ENDPOINT.to_string());
        let endpoint = Url::parse(&endpoint)
            .expect("LLM_ENDPOINT must be an absolute URL");

        let generator = GeneratorConfig {
            api_key: normalize_key(env::var("GROQ_API_KEY").ok()),
            endpoint,
            model: env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string()),
            temperature: env::var("LLM_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_LLM_TEMPERATURE),
            timeout: Duration::from_secs(
                env::var("LLM_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_LLM_TIMEOUT_SECS),
            ),
        };

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            port,
            static_dir,
            rust_log,
            generator,
        }
    }
}

/// Trims the key and treats a blank value as missing.
fn normalize_key(key: Option<String>) -> Option<String> {
    key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_api_key_counts_as_missing() {
        assert!(!GeneratorConfig::with_api_key(Some("   ".to_string())).has_api_key());
        assert!(!GeneratorConfig::with_api_key(None).has_api_key());
    }

    #[test]
    fn api_key_is_trimmed() {
        let config = GeneratorConfig::with_api_key(Some(" gsk_123\n".to_string()));
        assert_eq!(config.api_key.as_deref(), Some("gsk_123"));
    }

    #[test]
    fn defaults_point_at_groq() {
        let config = GeneratorConfig::with_api_key(None);
        assert_eq!(config.endpoint.as_str(), DEFAULT_LLM_ENDPOINT);
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
