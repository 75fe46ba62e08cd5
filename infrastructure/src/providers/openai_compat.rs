//! OpenAI-compatible chat completions adapter
//!
//! Serves any provider speaking the `/chat/completions` protocol —
//! OpenAI itself and xAI via a base URL override.

use super::{resolve_key, MAX_TOKENS, TEMPERATURE};
use async_trait::async_trait;
use quiz_application::ports::completion::{CompletionPort, GatewayError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default base URL (OpenAI)
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Adapter for OpenAI-compatible chat completion APIs
pub struct OpenAiCompatAdapter {
    client: reqwest::Client,
    model: String,
    base_url: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl OpenAiCompatAdapter {
    /// Create an adapter reading its key from `api_key_env`.
    ///
    /// A missing key does not fail construction; the first call to
    /// this provider reports it instead.
    pub fn new(
        client: reqwest::Client,
        model: impl Into<String>,
        base_url: impl Into<String>,
        api_key_env: impl Into<String>,
    ) -> Self {
        let api_key_env = api_key_env.into();
        Self {
            client,
            model: model.into(),
            base_url: base_url.into(),
            api_key: resolve_key(&api_key_env),
            api_key_env,
        }
    }
}

#[async_trait]
impl CompletionPort for OpenAiCompatAdapter {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, system: &str, prompt: &str) -> Result<String, GatewayError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GatewayError::MissingCredential(self.api_key_env.clone()))?;

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        debug!("Sending chat completion request to {}", self.base_url);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
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

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedReply(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                GatewayError::MalformedReply("reply contained no message content".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "gpt-4.1",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "sys",
                },
                ChatMessage {
                    role: "user",
                    content: "hello",
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4.1");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hello");
        assert_eq!(json["max_tokens"], 150);
    }

    #[test]
    fn test_response_deserialization() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Answer: A"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("Answer: A")
        );
    }

    #[tokio::test]
    async fn test_missing_key_fails_at_first_use() {
        let adapter = OpenAiCompatAdapter::new(
            reqwest::Client::new(),
            "gpt-4.1",
            OPENAI_BASE_URL,
            "QUIZ_QUORUM_TEST_UNSET_KEY",
        );

        let result = adapter.complete("sys", "prompt").await;
        assert!(matches!(
            result,
            Err(GatewayError::MissingCredential(env)) if env == "QUIZ_QUORUM_TEST_UNSET_KEY"
        ));
    }
}
