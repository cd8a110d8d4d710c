//! Runtime settings from environment variables.

use std::env;
use std::path::PathBuf;

/// Groq OpenAI-compatible endpoint.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Primary Groq vision model.
pub const GROQ_VISION_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

/// Same-capability backup tried once when the primary model errors.
pub const GROQ_BACKUP_MODEL: &str = "meta-llama/llama-4-maverick-17b-128e-instruct";

/// Secondary provider model.
pub const GEMINI_MODEL: &str = "gemini-2.0-flash-exp";

/// Default directory for debug screenshot copies.
pub const DEFAULT_OUTPUT_DIR: &str = "Agent-output";

/// Everything read from the environment at startup. Credentials are never
/// logged.
#[derive(Debug, Clone)]
pub struct Settings {
    pub groq_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub groq_model: String,
    pub groq_backup_model: String,
    pub gemini_model: String,
    /// Explicit device serial; `None` means take the first attached device.
    pub device_serial: Option<String>,
    pub output_dir: PathBuf,
}

fn non_empty(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

impl Settings {
    /// Read settings from the environment (after dotenv has loaded).
    pub fn from_env() -> Self {
        Self {
            groq_api_key: non_empty("GROQ_API_KEY"),
            gemini_api_key: non_empty("GEMINI_API_KEY"),
            groq_model: non_empty("GROQ_VISION_MODEL")
                .unwrap_or_else(|| GROQ_VISION_MODEL.to_string()),
            groq_backup_model: non_empty("GROQ_BACKUP_MODEL")
                .unwrap_or_else(|| GROQ_BACKUP_MODEL.to_string()),
            gemini_model: non_empty("GEMINI_MODEL").unwrap_or_else(|| GEMINI_MODEL.to_string()),
            device_serial: non_empty("ADB_DEVICE_ID"),
            output_dir: non_empty("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        }
    }

    /// At least one vision provider is usable.
    pub fn has_vision_provider(&self) -> bool {
        self.groq_api_key.is_some() || self.gemini_api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_presence() {
        let mut settings = Settings {
            groq_api_key: None,
            gemini_api_key: None,
            groq_model: GROQ_VISION_MODEL.to_string(),
            groq_backup_model: GROQ_BACKUP_MODEL.to_string(),
            gemini_model: GEMINI_MODEL.to_string(),
            device_serial: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        };
        assert!(!settings.has_vision_provider());

        settings.gemini_api_key = Some("key".into());
        assert!(settings.has_vision_provider());
    }
}
