//! Google Gemini generateContent adapter

use super::{resolve_key, MAX_TOKENS, TEMPERATURE};
use async_trait::async_trait;
use quiz_application::ports::completion::{CompletionPort, GatewayError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Base URL for the Gemini API
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f64,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

/// Adapter for the Gemini generateContent API
pub struct GeminiAdapter {
    client: reqwest::Client,
    model: String,
    base_url: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl GeminiAdapter {
    pub fn new(
        client: reqwest::Client,
        model: impl Into<String>,
        api_key_env: impl Into<String>,
    ) -> Self {
        let api_key_env = api_key_env.into();
        Self {
            client,
            model: model.into(),
            base_url: GEMINI_BASE_URL.to_string(),
            api_key: resolve_key(&api_key_env),
            api_key_env,
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl CompletionPort for GeminiAdapter {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, system: &str, prompt: &str) -> Result<String, GatewayError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GatewayError::MissingCredential(self.api_key_env.clone()))?;

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction: Content {
                parts: vec![Part {
                    text: system.to_string(),
                }],
            },
            generation_config: GenerationConfig {
                max_output_tokens: MAX_TOKENS,
                temperature: TEMPERATURE,
            },
        };

        debug!("Sending generateContent request for model {}", self.model);

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedReply(e.to_string()))?;

        // Safety filtering surfaces as an empty candidate list or a
        // candidate with no content parts
        let Some(candidate) = parsed.candidates.into_iter().next() else {
            return Err(GatewayError::ContentBlocked("no candidates".to_string()));
        };

        let text: String = match candidate.content {
            Some(content) if !content.parts.is_empty() => content
                .parts
                .into_iter()
                .map(|part| part.text)
                .collect::<Vec<_>>()
                .join(""),
            _ => {
                let reason = candidate
                    .finish_reason
                    .unwrap_or_else(|| "unknown".to_string());
                return Err(GatewayError::ContentBlocked(reason));
            }
        };

        if text.is_empty() {
            return Err(GatewayError::MalformedReply(
                "reply contained no text".to_string(),
            ));
        }

        Ok(text)
    }
}
