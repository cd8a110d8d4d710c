//! Groq vision client (OpenAI-compatible chat completions API).

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tokio::time::sleep;

use super::reply::{parse_reply, VisionReply};

/// Fixed backoff after a rate-limit signal, then give up (no recursion).
pub const RATE_LIMIT_BACKOFF_SECS: u64 = 5;

/// Output token budget for a vision reply. The prompts ask for small JSON
/// records, so this also acts as an implicit latency cap.
pub const MAX_REPLY_TOKENS: u32 = 500;

/// Low temperature biases toward deterministic, literal answers.
pub const REPLY_TEMPERATURE: f32 = 0.1;

/// Vision backend errors. Internal to the client; every variant degrades to
/// "no result" at the public boundary.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Rate limited: {0}")]
    RateLimited(String),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Empty response from model")]
    EmptyResponse,
}

impl ModelError {
    fn is_rate_limit(&self) -> bool {
        match self {
            ModelError::RateLimited(_) => true,
            ModelError::ApiError(msg) => {
                msg.contains("429") || msg.to_lowercase().contains("rate")
            }
            _ => false,
        }
    }
}

/// Configuration for one OpenAI-compatible vision provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    /// Same-capability backup tried once on a generic remote error.
    pub backup_model: Option<String>,
}

impl ProviderConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            backup_model: None,
        }
    }

    pub fn with_backup_model(mut self, model: impl Into<String>) -> Self {
        self.backup_model = Some(model.into());
        self
    }
}

/// OpenAI-compatible response structures.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: String,
}

/// Client for an OpenAI-compatible vision-language model endpoint.
///
/// Never lets a remote failure escape: rate limits back off once and yield
/// `None`, generic errors get exactly one backup-model attempt, parse
/// failures yield `None`.
pub struct ChatVisionClient {
    config: ProviderConfig,
    client: Client,
}

impl ChatVisionClient {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Query the model with a base64 PNG and a task prompt.
    ///
    /// `model_override` pins a specific model and disables the backup hop
    /// (used for the backup attempt itself).
    pub async fn ask(
        &self,
        image_base64: &str,
        prompt: &str,
        model_override: Option<&str>,
    ) -> Option<VisionReply> {
        let model = model_override.unwrap_or(&self.config.model);

        match self.send_request(image_base64, prompt, model).await {
            Ok(text) => parse_reply(&text),
            Err(e) if e.is_rate_limit() => {
                tracing::warn!("⏳ {} rate limited, backing off...", model);
                sleep(Duration::from_secs(RATE_LIMIT_BACKOFF_SECS)).await;
                None
            }
            Err(e) => {
                tracing::warn!("⚠️ Model error from {}: {}", model, e);
                // One hop to the backup model, never recursive
                if model_override.is_none() {
                    if let Some(backup) = self.config.backup_model.clone() {
                        tracing::info!("🔄 Trying backup model {}...", backup);
                        return match self.send_request(image_base64, prompt, &backup).await {
                            Ok(text) => parse_reply(&text),
                            Err(e) => {
                                tracing::warn!("⚠️ Backup model error: {}", e);
                                None
                            }
                        };
                    }
                }
                None
            }
        }
    }

    async fn send_request(
        &self,
        image_base64: &str,
        prompt: &str,
        model: &str,
    ) -> Result<String, ModelError> {
        let url = format!("{}/chat/completions", self.config.base_url);

        let body = json!({
            "model": model,
            "messages": [build_user_message(prompt, image_base64)],
            "response_format": {"type": "json_object"},
            "temperature": REPLY_TEMPERATURE,
            "max_tokens": MAX_REPLY_TOKENS,
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 429 {
            let text = response.text().await.unwrap_or_default();
            return Err(ModelError::RateLimited(text));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ModelError::ApiError(format!("{}: {}", status, text)));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(ModelError::EmptyResponse)
    }
}

/// Build the single user message carrying prompt text plus the screenshot.
fn build_user_message(prompt: &str, image_base64: &str) -> Value {
    json!({
        "role": "user",
        "content": [
            {"type": "text", "text": prompt},
            {
                "type": "image_url",
                "image_url": {
                    "url": format!("data:image/png;base64,{}", image_base64)
                }
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_config_builder() {
        let config = ProviderConfig::new("https://api.example.com/v1", "key", "scout")
            .with_backup_model("maverick");
        assert_eq!(config.model, "scout");
        assert_eq!(config.backup_model.as_deref(), Some("maverick"));
    }

    #[test]
    fn test_rate_limit_classification() {
        assert!(ModelError::RateLimited("too fast".into()).is_rate_limit());
        assert!(ModelError::ApiError("429 Too Many Requests".into()).is_rate_limit());
        assert!(ModelError::ApiError("rate limit exceeded".into()).is_rate_limit());
        assert!(!ModelError::ApiError("500 internal".into()).is_rate_limit());
        assert!(!ModelError::EmptyResponse.is_rate_limit());
    }

    #[test]
    fn test_user_message_shape() {
        let msg = build_user_message("find the menu", "aGVsbG8=");
        assert_eq!(msg["role"], "user");
        assert_eq!(msg["content"][0]["type"], "text");
        assert_eq!(msg["content"][1]["type"], "image_url");
        assert_eq!(
            msg["content"][1]["image_url"]["url"],
            "data:image/png;base64,aGVsbG8="
        );
    }
}
