//! Consensus report and evaluation result types

use crate::answer::{AnswerLetter, ProviderAnswer};
use serde::{Deserialize, Serialize};

/// Structured multi-provider analysis attached to a quorum answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusReport {
    /// True only when every provider succeeded and all answers agree
    pub consensus: bool,
    /// The agreed letter, present only when `consensus` is true
    pub consensus_answer: Option<AnswerLetter>,
    /// Mean confidence across every provider result, rounded to one
    /// decimal; error-flagged confidences (1 or 0) count toward the mean
    pub average_confidence: f64,
    /// Distinct disagreeing letters; non-empty iff `consensus` is false
    /// and every provider succeeded
    pub conflicting_answers: Vec<AnswerLetter>,
    /// Every provider result, in slot priority order
    pub responses: Vec<ProviderAnswer>,
}

impl ConsensusReport {
    /// Report for the degenerate no-results case
    pub fn empty() -> Self {
        Self {
            consensus: false,
            consensus_answer: None,
            average_confidence: 0.0,
            conflicting_answers: Vec::new(),
            responses: Vec::new(),
        }
    }

    /// Number of successful (non-error) results
    pub fn success_count(&self) -> usize {
        self.responses.iter().filter(|r| !r.error).count()
    }

    /// Number of error-flagged results
    pub fn error_count(&self) -> usize {
        self.responses.iter().filter(|r| r.error).count()
    }
}

/// Hint for the caller about how to present the answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    /// Consensus reached: one agreed answer to highlight
    Single,
    /// No consensus: multiple candidate answers exist
    Multiple,
}

/// Reconciled multi-provider answer
///
/// Carries both the flat legacy triple (answer, confidence, reasoning)
/// and the full [`ConsensusReport`] for callers that want per-provider
/// detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuorumAnswer {
    /// The reconciled primary answer
    pub answer: AnswerLetter,
    /// Mean confidence rounded to the nearest integer
    pub confidence: u8,
    /// Human-readable summary of how the answer was reached
    pub raw: String,
    /// Reasoning behind the primary answer
    pub reasoning: String,
    /// Presentation hint
    pub highlight: Highlight,
    /// Full per-provider analysis
    pub report: ConsensusReport,
}

/// Result of evaluating a question
///
/// The variant is chosen by the requested mode at call time, so callers
/// never inspect the shape of the result to discover which path
/// produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Evaluation {
    /// Single-provider result, returned directly without reconciliation
    Single(ProviderAnswer),
    /// Multi-provider reconciled result
    Quorum(QuorumAnswer),
}

impl Evaluation {
    /// The flat answer letter, regardless of mode
    pub fn answer(&self) -> AnswerLetter {
        match self {
            Evaluation::Single(answer) => answer.answer,
            Evaluation::Quorum(quorum) => quorum.answer,
        }
    }

    /// The flat confidence, regardless of mode
    pub fn confidence(&self) -> u8 {
        match self {
            Evaluation::Single(answer) => answer.confidence,
            Evaluation::Quorum(quorum) => quorum.confidence,
        }
    }
}
