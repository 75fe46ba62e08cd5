//! Completion port
//!
//! Defines the interface for one external text-completion provider.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during a provider call
///
/// Every variant is recovered locally by the gateway into an
/// error-flagged result; none of these propagate past the gateway
/// boundary.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Missing credential: environment variable {0} is not set")]
    MissingCredential(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Provider returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Malformed reply: {0}")]
    MalformedReply(String),

    #[error("Content blocked by provider safety filters ({0})")]
    ContentBlocked(String),
}

impl GatewayError {
    /// Check if this error represents provider-side content blocking
    pub fn is_content_blocked(&self) -> bool {
        matches!(self, GatewayError::ContentBlocked(_))
    }
}

/// One external text-completion provider
///
/// The core sends a system instruction plus a user prompt and receives
/// free-form text. No structured-output mode is assumed; the reply is
/// handed to the domain reply parser as-is.
#[async_trait]
pub trait CompletionPort: Send + Sync {
    /// Model identifier for this provider (e.g. "gpt-4.1")
    fn model(&self) -> &str;

    /// Send one prompt and return the provider's raw reply text
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_blocked_check() {
        assert!(GatewayError::ContentBlocked("SAFETY".to_string()).is_content_blocked());
        assert!(!GatewayError::RequestFailed("timeout".to_string()).is_content_blocked());
    }

    #[test]
    fn test_missing_credential_display() {
        let error = GatewayError::MissingCredential("OPENAI_API_KEY".to_string());
        assert_eq!(
            error.to_string(),
            "Missing credential: environment variable OPENAI_API_KEY is not set"
        );
    }
}
