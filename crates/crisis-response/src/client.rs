//! Gemini generation client
//!
//! Single opaque call: structured prompt + response schema in, parsed
//! `CrisisResponse` or a classified error out. Nothing in here retries;
//! a failed generation needs a fresh alert selection.

use crate::prompt::SYSTEM_INSTRUCTION;
use crate::schema::{response_schema, CrisisResponse};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

const GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Generation service returned status {0}")]
    Service(u16),
    #[error("Empty reply from generation service")]
    EmptyReply,
    #[error("Malformed reply: {0}")]
    Malformed(String),
}

/// Seam for the external generation service; the orchestrator only ever
/// sees this trait.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<CrisisResponse, GenerationError>;
}

/// Generation client configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    /// Request timeout in seconds
    pub timeout_sec: u64,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "gemini-2.5-flash".to_string(),
            timeout_sec: 30,
        }
    }

    /// Read the key from `GEMINI_API_KEY` (or legacy `API_KEY`)
    pub fn from_env() -> Option<Self> {
        std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .map(Self::new)
    }
}

pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_sec))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

/// generateContent reply envelope
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

#[async_trait]
impl ResponseGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<CrisisResponse, GenerationError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_BASE, self.config.model, self.config.api_key
        );

        let body = json!({
            "system_instruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
            }
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GenerationError::Service(response.status().as_u16()));
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;

        let text: String = envelope
            .candidates
            .into_iter()
            .next()
            .ok_or(GenerationError::EmptyReply)?
            .content
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect();
        if text.is_empty() {
            return Err(GenerationError::EmptyReply);
        }

        serde_json::from_str(&text).map_err(|e| GenerationError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_text_extraction_shape() {
        let raw = json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "{\"a\":" },
                    { "text": "1}" }
                ]}
            }]
        });
        let envelope: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        let text: String = envelope
            .candidates
            .into_iter()
            .next()
            .unwrap()
            .content
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect();
        assert_eq!(text, "{\"a\":1}");
    }

    #[test]
    fn empty_candidates_is_empty_reply() {
        let envelope: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [] })).unwrap();
        assert!(envelope.candidates.is_empty());
    }

    #[test]
    fn config_defaults() {
        let config = GeminiConfig::new("test-key");
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.timeout_sec, 30);
    }
}
