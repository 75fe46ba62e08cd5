//! Reconciliation of per-provider answers into one quorum answer

use crate::answer::{AnswerLetter, ProviderAnswer};
use crate::consensus::report::{ConsensusReport, Highlight, QuorumAnswer};
use std::collections::BTreeSet;

/// Reconcile provider answers into a single [`QuorumAnswer`].
///
/// Input order is the slot priority order; reconciliation itself is
/// order-independent except for tie-breaking, which prefers the
/// earlier (higher-priority) result.
///
/// Rules:
/// - consensus requires zero errors and a single distinct letter;
/// - any error forces `consensus = false` even if survivors agree;
/// - `conflicting_answers` lists distinct letters only for a pure
///   disagreement (no errors);
/// - the primary answer is the highest-confidence success, or the
///   highest-confidence error result when nothing succeeded;
/// - the mean confidence counts every result, including errors.
pub fn reconcile(responses: &[ProviderAnswer]) -> QuorumAnswer {
    if responses.is_empty() {
        // Contract violation of the gateway layer — guarded, not raised
        return QuorumAnswer {
            answer: AnswerLetter::A,
            confidence: 1,
            raw: "No provider produced a result; returning fixed fallback answer".to_string(),
            reasoning: "No provider results available".to_string(),
            highlight: Highlight::Multiple,
            report: ConsensusReport::empty(),
        };
    }

    let successes: Vec<&ProviderAnswer> = responses.iter().filter(|r| !r.error).collect();
    let error_count = responses.len() - successes.len();

    let average = mean_confidence(responses);
    let average_1dp = (average * 10.0).round() / 10.0;
    let scalar_confidence = average.round().clamp(0.0, 10.0) as u8;

    let distinct: BTreeSet<AnswerLetter> = successes.iter().map(|r| r.answer).collect();
    let consensus = error_count == 0 && distinct.len() == 1;

    if consensus {
        let answer = *distinct.iter().next().unwrap_or(&AnswerLetter::A);
        return QuorumAnswer {
            answer,
            confidence: scalar_confidence,
            raw: format!(
                "Consensus reached: {} (average confidence: {:.1})",
                answer, average_1dp
            ),
            reasoning: consensus_reasoning(&successes),
            highlight: Highlight::Single,
            report: ConsensusReport {
                consensus: true,
                consensus_answer: Some(answer),
                average_confidence: average_1dp,
                conflicting_answers: Vec::new(),
                responses: responses.to_vec(),
            },
        };
    }

    // No consensus: pick the best-effort primary answer
    let primary = highest_confidence(&successes)
        .or_else(|| highest_confidence(&responses.iter().collect::<Vec<_>>()))
        .unwrap_or(&responses[0]);

    let conflicting: Vec<AnswerLetter> = if error_count == 0 {
        distinct.into_iter().collect()
    } else {
        Vec::new()
    };

    let raw = if error_count > 0 && !successes.is_empty() {
        format!(
            "No consensus: {} provider(s) failed, remaining providers disagree or are unconfirmed",
            error_count
        )
    } else if error_count > 0 {
        format!("No consensus: all {} provider(s) failed", error_count)
    } else {
        format!(
            "No consensus: providers disagree - {} (average confidence: {:.1})",
            conflicting
                .iter()
                .map(|l| l.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            average_1dp
        )
    };

    let reasoning = if primary.has_substantive_reasoning() {
        primary.reasoning.clone()
    } else {
        "Selected highest-confidence answer from available providers".to_string()
    };

    QuorumAnswer {
        answer: primary.answer,
        confidence: scalar_confidence,
        raw,
        reasoning,
        highlight: Highlight::Multiple,
        report: ConsensusReport {
            consensus: false,
            consensus_answer: None,
            average_confidence: average_1dp,
            conflicting_answers: conflicting,
            responses: responses.to_vec(),
        },
    }
}

/// Mean confidence across every result, errors included
fn mean_confidence(responses: &[ProviderAnswer]) -> f64 {
    let sum: u32 = responses.iter().map(|r| r.confidence as u32).sum();
    sum as f64 / responses.len() as f64
}

/// Highest-confidence result; earlier (higher-priority) results win ties
fn highest_confidence<'a>(responses: &[&'a ProviderAnswer]) -> Option<&'a ProviderAnswer> {
    let mut best: Option<&ProviderAnswer> = None;
    for response in responses.iter().copied() {
        match best {
            Some(current) if response.confidence <= current.confidence => {}
            _ => best = Some(response),
        }
    }
    best
}

/// Join up to two substantive reasonings for a consensus answer
fn consensus_reasoning(successes: &[&ProviderAnswer]) -> String {
    let parts: Vec<&str> = successes
        .iter()
        .filter(|r| r.has_substantive_reasoning())
        .map(|r| r.reasoning.as_str())
        .take(2)
        .collect();

    if parts.is_empty() {
        "All providers agree on this answer".to_string()
    } else {
        parts.join(" | ")
    }
}
