//! OpenAI-compatible chat-completions client.
//!
//! Only the subset both collaborators need: one system prompt, one user
//! message, deterministic sampling, plain text back.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::LlmError;

/// Default base URL for the chat API.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model name.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for the chat client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Bearer token; may be empty for local servers that need none
    pub api_key: String,
    /// Base URL, up to and including the version segment
    pub base_url: String,
    /// Model name sent with every request
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 60,
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::new("")
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Pull the text out of a chat response body.
fn completion_text(body: &str) -> Result<String, LlmError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(LlmError::EmptyCompletion)?;

    if content.trim().is_empty() {
        return Err(LlmError::EmptyCompletion);
    }
    Ok(content)
}

/// Chat-completions client.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl ChatClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let mut headers = HeaderMap::new();
        if !config.api_key.is_empty() {
            let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|_| LlmError::NotConfigured("invalid API key format".to_string()))?;
            headers.insert(AUTHORIZATION, bearer);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model,
        })
    }

    /// Run one completion at temperature 0 and return its text.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: 0.0,
        };

        debug!(model = %self.model, input_len = user.len(), "chat completion request");

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;
        completion_text(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_choice() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": "أهلا"}}]}"#;
        assert_eq!(completion_text(body).unwrap(), "أهلا");
    }

    #[test]
    fn empty_or_missing_content_is_an_error() {
        assert!(matches!(
            completion_text(r#"{"choices": []}"#),
            Err(LlmError::EmptyCompletion)
        ));
        assert!(matches!(
            completion_text(r#"{"choices": [{"message": {"content": null}}]}"#),
            Err(LlmError::EmptyCompletion)
        ));
        assert!(matches!(
            completion_text(r#"{"choices": [{"message": {"content": "  \n"}}]}"#),
            Err(LlmError::EmptyCompletion)
        ));
    }

    #[test]
    fn malformed_body_is_invalid_response() {
        assert!(matches!(
            completion_text("<html>"),
            Err(LlmError::InvalidResponse(_))
        ));
    }

    #[test]
    fn request_shape() {
        let request = ChatRequest {
            model: "m",
            messages: [
                ChatMessage {
                    role: "system",
                    content: "s",
                },
                ChatMessage {
                    role: "user",
                    content: "u",
                },
            ],
            temperature: 0.0,
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "m");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "u");
        assert_eq!(json["temperature"], 0.0);
    }

    #[test]
    fn config_builder() {
        let config = LlmConfig::new("key")
            .with_base_url("http://localhost:11434/v1/")
            .with_model("qwen2.5")
            .with_timeout(5);
        assert_eq!(config.model, "qwen2.5");

        let client = ChatClient::new(config).unwrap();
        assert_eq!(client.base_url, "http://localhost:11434/v1");
    }
}
