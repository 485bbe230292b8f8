//! Application configuration. API credentials, paths, persona.

use serde::Deserialize;

/// Number of recent messages included in a chat excerpt.
pub const DEFAULT_CHAT_EXCERPT_LENGTH: usize = 20;

/// Recipient used when email extraction fails.
pub const DEFAULT_FALLBACK_RECIPIENT: &str = "me@example.com";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    // ─────────────────────────────────────────────────────────────────────────
    // Text generation
    // ─────────────────────────────────────────────────────────────────────────
    /// LLM API key. Read from ASSISTANT_AI_API_KEY.
    #[serde(default)]
    pub ai_api_key: Option<String>,

    /// LLM API URL (OpenAI-compatible chat completions). Read from ASSISTANT_AI_API_URL.
    #[serde(default)]
    pub ai_api_url: Option<String>,

    /// Model name. Defaults to "gpt-4o-mini". Read from ASSISTANT_AI_MODEL.
    #[serde(default)]
    pub ai_model: Option<String>,

    #[serde(default)]
    pub ai_temperature: Option<f32>,

    #[serde(default)]
    pub ai_max_tokens: Option<u32>,

    /// Ask the model to classify queries before falling back to keywords.
    #[serde(default)]
    pub llm_classification: Option<bool>,

    // ─────────────────────────────────────────────────────────────────────────
    // Google (Gmail + Calendar)
    // ─────────────────────────────────────────────────────────────────────────
    /// OAuth bearer token with Gmail and Calendar scopes. Read from ASSISTANT_GOOGLE_ACCESS_TOKEN.
    #[serde(default)]
    pub google_access_token: Option<String>,

    #[serde(default)]
    pub calendar_id: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Local files
    // ─────────────────────────────────────────────────────────────────────────
    /// Directory for email archives. Defaults to "emails".
    #[serde(default)]
    pub email_archive_dir: Option<String>,

    /// Directory holding Telegram Desktop JSON exports, one `<contact>.json` per chat.
    #[serde(default)]
    pub telegram_export_dir: Option<String>,

    #[serde(default)]
    pub chat_excerpt_length: Option<usize>,

    // ─────────────────────────────────────────────────────────────────────────
    // Persona
    // ─────────────────────────────────────────────────────────────────────────
    /// The assistant owner's name, used in chat-advice prompts.
    #[serde(default)]
    pub owner_name: Option<String>,

    #[serde(default)]
    pub fallback_recipient: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("ASSISTANT"));
        if let Ok(path) = std::env::var("ASSISTANT_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the LLM API key if configured.
    pub fn ai_api_key(&self) -> Option<String> {
        self.ai_api_key
            .clone()
            .or_else(|| std::env::var("ASSISTANT_AI_API_KEY").ok())
            .filter(|k| !k.is_empty())
    }

    /// Returns the LLM API URL. Defaults to OpenAI chat completions endpoint.
    pub fn ai_api_url_or_default(&self) -> String {
        self.ai_api_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com/v1/chat/completions".to_string())
    }

    pub fn ai_model_or_default(&self) -> String {
        self.ai_model
            .clone()
            .unwrap_or_else(|| "gpt-4o-mini".to_string())
    }

    pub fn ai_temperature_or_default(&self) -> f32 {
        self.ai_temperature.unwrap_or(0.7)
    }

    pub fn ai_max_tokens_or_default(&self) -> u32 {
        self.ai_max_tokens.unwrap_or(1024)
    }

    /// Returns true if a real LLM backend is configured (API key present).
    pub fn is_ai_configured(&self) -> bool {
        self.ai_api_key().is_some()
    }

    pub fn llm_classification_enabled(&self) -> bool {
        self.llm_classification.unwrap_or(false)
    }

    /// Returns the Google bearer token from config or ASSISTANT_GOOGLE_ACCESS_TOKEN env.
    pub fn google_access_token(&self) -> Option<String> {
        self.google_access_token
            .clone()
            .or_else(|| std::env::var("ASSISTANT_GOOGLE_ACCESS_TOKEN").ok())
            .filter(|t| !t.is_empty())
    }

    pub fn calendar_id_or_default(&self) -> String {
        self.calendar_id
            .clone()
            .unwrap_or_else(|| "primary".to_string())
    }

    pub fn email_archive_dir_or_default(&self) -> String {
        self.email_archive_dir
            .clone()
            .unwrap_or_else(|| "emails".to_string())
    }

    pub fn telegram_export_dir_or_default(&self) -> String {
        self.telegram_export_dir
            .clone()
            .unwrap_or_else(|| "telegram".to_string())
    }

    pub fn chat_excerpt_length_or_default(&self) -> usize {
        self.chat_excerpt_length
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_CHAT_EXCERPT_LENGTH)
    }

    pub fn owner_name_or_default(&self) -> String {
        self.owner_name
            .clone()
            .unwrap_or_else(|| "Alex".to_string())
    }

    pub fn fallback_recipient_or_default(&self) -> String {
        self.fallback_recipient
            .clone()
            .unwrap_or_else(|| DEFAULT_FALLBACK_RECIPIENT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.ai_model_or_default(), "gpt-4o-mini");
        assert_eq!(cfg.calendar_id_or_default(), "primary");
        assert_eq!(cfg.email_archive_dir_or_default(), "emails");
        assert_eq!(cfg.chat_excerpt_length_or_default(), DEFAULT_CHAT_EXCERPT_LENGTH);
        assert_eq!(cfg.fallback_recipient_or_default(), DEFAULT_FALLBACK_RECIPIENT);
        assert!(!cfg.llm_classification_enabled());
    }

    #[test]
    fn test_zero_excerpt_length_uses_default() {
        let cfg = AppConfig {
            chat_excerpt_length: Some(0),
            ..Default::default()
        };
        assert_eq!(cfg.chat_excerpt_length_or_default(), DEFAULT_CHAT_EXCERPT_LENGTH);
    }
}
