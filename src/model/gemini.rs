//! Gemini vision client (`generateContent` API).

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::client::{MAX_REPLY_TOKENS, REPLY_TEMPERATURE};
use super::reply::{parse_reply, VisionReply};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini `generateContent` response structures.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// Client for Google's Gemini vision models.
///
/// Secondary provider: every failure mode, rate limiting included, degrades
/// straight to `None` with no backup hop.
pub struct GeminiClient {
    api_key: String,
    model: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            client: Client::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Query Gemini with a base64 PNG and a task prompt.
    pub async fn ask(&self, image_base64: &str, prompt: &str) -> Option<VisionReply> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            GEMINI_BASE_URL, self.model, self.api_key
        );

        let body = json!({
            "contents": [{
                "parts": [
                    {"text": prompt},
                    {"inline_data": {"mime_type": "image/png", "data": image_base64}}
                ]
            }],
            "generationConfig": {
                "response_mime_type": "application/json",
                "temperature": REPLY_TEMPERATURE,
                "maxOutputTokens": MAX_REPLY_TOKENS,
            }
        });

        let response = match self.client.post(&url).json(&body).send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!("⚠️ Gemini request failed: {}", e);
                return None;
            }
        };

        let status = response.status();
        if status.as_u16() == 429 {
            tracing::warn!("⏳ Gemini rate limited");
            return None;
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!("⚠️ Gemini error {}: {}", status, text);
            return None;
        }

        let parsed: GenerateContentResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("⚠️ Gemini response decode failed: {}", e);
                return None;
            }
        };

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)?;

        parse_reply(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_deserialization() {
        let raw = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "{\"found\": true, \"point\": [1, 2]}"}]}
            }]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.candidates.len(), 1);
        let text = &parsed.candidates[0].content.parts[0].text;
        let reply = parse_reply(text).unwrap();
        assert!(reply.found);
    }

    #[test]
    fn test_empty_candidates_tolerated() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());
    }
}
