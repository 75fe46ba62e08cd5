//! Provider answer entity

use crate::answer::letter::AnswerLetter;
use crate::answer::slot::ProviderSlot;
use serde::{Deserialize, Serialize};

/// A single provider's structured answer to a question
///
/// Produced once per provider call and immutable afterwards. Successful
/// answers are promoted into the answer cache; error-flagged answers
/// are never cached.
///
/// `confidence` is 1-10 for real answers, 1 for generic failures, and 0
/// for a content-blocked reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderAnswer {
    /// Model identifier of the provider that produced this answer
    pub provider: String,
    /// Selected answer letter
    pub answer: AnswerLetter,
    /// Confidence level (0-10)
    pub confidence: u8,
    /// Raw provider reply, or a diagnostic on failure
    pub raw: String,
    /// Extracted reasoning text
    pub reasoning: String,
    /// Whether this answer represents a provider failure
    pub error: bool,
}

impl ProviderAnswer {
    /// A successful, parsed provider answer
    pub fn success(
        provider: impl Into<String>,
        answer: AnswerLetter,
        confidence: u8,
        raw: impl Into<String>,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            answer,
            confidence: confidence.min(10),
            raw: raw.into(),
            reasoning: reasoning.into(),
            error: false,
        }
    }

    /// An error-flagged answer for a failed provider call
    ///
    /// Uses the slot's fallback letter and minimum confidence so the
    /// failure stays visible but never wins reconciliation.
    pub fn failure(
        provider: impl Into<String>,
        slot: ProviderSlot,
        diagnostic: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            answer: slot.fallback_letter(),
            confidence: 1,
            raw: diagnostic.into(),
            reasoning: "Error: provider failed to respond".to_string(),
            error: true,
        }
    }

    /// An error-flagged answer for a content-blocked reply
    ///
    /// Confidence 0 distinguishes safety blocking from ordinary
    /// failures in the report.
    pub fn blocked(
        provider: impl Into<String>,
        slot: ProviderSlot,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            answer: slot.fallback_letter(),
            confidence: 0,
            raw: reason.into(),
            reasoning: "Content blocked by provider safety filters".to_string(),
            error: true,
        }
    }

    /// Whether this answer carries substantive reasoning text
    pub fn has_substantive_reasoning(&self) -> bool {
        !self.reasoning.is_empty()
            && self.reasoning != "No reasoning provided"
            && !self.reasoning.starts_with("Error:")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_clamps_confidence() {
        let answer = ProviderAnswer::success("gpt-4.1", AnswerLetter::B, 14, "raw", "why");
        assert_eq!(answer.confidence, 10);
        assert!(!answer.error);
    }

    #[test]
    fn test_failure_uses_slot_fallback() {
        let answer = ProviderAnswer::failure("grok-4", ProviderSlot::Third, "timeout");
        assert!(answer.error);
        assert_eq!(answer.answer, ProviderSlot::Third.fallback_letter());
        assert_eq!(answer.confidence, 1);
        assert_eq!(answer.raw, "timeout");
    }

    #[test]
    fn test_blocked_has_zero_confidence() {
        let answer =
            ProviderAnswer::blocked("gemini-2.5-pro", ProviderSlot::Second, "SAFETY");
        assert!(answer.error);
        assert_eq!(answer.confidence, 0);
    }

    #[test]
    fn test_substantive_reasoning() {
        let good = ProviderAnswer::success("m", AnswerLetter::A, 7, "raw", "Paris is the capital");
        assert!(good.has_substantive_reasoning());

        let placeholder =
            ProviderAnswer::success("m", AnswerLetter::A, 7, "raw", "No reasoning provided");
        assert!(!placeholder.has_substantive_reasoning());

        let failed = ProviderAnswer::failure("m", ProviderSlot::First, "boom");
        assert!(!failed.has_substantive_reasoning());
    }

    #[test]
    fn test_serde_roundtrip_preserves_all_fields() {
        let answer = ProviderAnswer::success("gpt-4.1", AnswerLetter::C, 9, "Answer: C", "because");
        let json = serde_json::to_string(&answer).unwrap();
        let back: ProviderAnswer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, answer);
    }
}
