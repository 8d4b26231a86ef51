//! OpenAI-compatible chat completions client (Groq by default).

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{GenerationRequest, TextGenerator};
use crate::error::{Result, TravelError};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Connection settings for [`GroqGenerator`].
#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub api_key: String,
    pub model: String,
    /// Base URL without the trailing `/chat/completions`
    pub base_url: String,
}

impl GroqConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Sends prompts to a chat-completions endpoint with bearer authentication.
pub struct GroqGenerator {
    config: GroqConfig,
    client: reqwest::Client,
}

impl GroqGenerator {
    pub fn new(config: GroqConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TravelError::Configuration {
                message: format!("Failed to create HTTP client: {e}"),
            })?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl TextGenerator for GroqGenerator {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        info!(
            "Requesting completion from {} (max_tokens={})",
            self.config.model, request.max_tokens
        );
        let response = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TravelError::generation(format!("HTTP request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(TravelError::generation(format!(
                "API error: {status} - {detail}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| TravelError::generation(format!("Failed to parse API response: {e}")))?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| TravelError::generation("API response contained no message"))?;
        debug!("Received {} bytes of generated text", content.len());
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let mut config = GroqConfig::new("key");
        assert_eq!(
            config.endpoint(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
        config.base_url = "http://localhost:8080/v1/".to_string();
        assert_eq!(config.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_chat_request_shape() {
        let body = ChatRequest {
            model: DEFAULT_MODEL,
            messages: [
                ChatMessage {
                    role: "system",
                    content: "be brief",
                },
                ChatMessage {
                    role: "user",
                    content: "hi",
                },
            ],
            temperature: 0.5,
            max_tokens: 10,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["max_tokens"], 10);
    }

    #[test]
    fn test_response_without_choices_parses() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }
}
