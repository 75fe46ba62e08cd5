//! Evaluate Question use case
//!
//! The consensus aggregator: orchestrates one or all provider gateways
//! and reconciles their answers into a single [`Evaluation`].

use crate::gateway::ProviderGateway;
use quiz_domain::{
    reconcile, DomainError, Evaluation, ProviderAnswer, QuizQuestion, ASK_DEFAULT_CONFIDENCE,
    QUORUM_DEFAULT_CONFIDENCE,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Errors that can occur during evaluation
///
/// Only structurally invalid input fails; every provider-side problem
/// is absorbed beneath the aggregator boundary and surfaces as a
/// flagged, low-confidence answer instead.
#[derive(Error, Debug)]
pub enum EvaluateError {
    #[error(transparent)]
    InvalidInput(#[from] DomainError),
}

/// Evaluation mode, chosen by the caller per request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluateMode {
    /// Ask only the designated primary provider
    Single,
    /// Ask all providers concurrently and reconcile
    Multi,
}

impl std::str::FromStr for EvaluateMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(EvaluateMode::Single),
            "multi" => Ok(EvaluateMode::Multi),
            other => Err(format!("unknown mode: {} (expected single|multi)", other)),
        }
    }
}

/// Use case for answering a multiple-choice question
///
/// Holds one gateway per provider slot, constructed once at service
/// start. The first gateway is the designated primary for single mode.
pub struct EvaluateQuestionUseCase {
    gateways: Vec<Arc<ProviderGateway>>,
}

impl EvaluateQuestionUseCase {
    /// Create the use case from gateways in slot priority order
    pub fn new(gateways: Vec<Arc<ProviderGateway>>) -> Self {
        Self { gateways }
    }

    /// Evaluate a question in the requested mode.
    ///
    /// Fails only when the input is structurally invalid (question
    /// empty, or outside the 2-4 option range).
    pub async fn evaluate(
        &self,
        question: impl Into<String>,
        options: Vec<String>,
        mode: EvaluateMode,
    ) -> Result<Evaluation, EvaluateError> {
        let question = QuizQuestion::new(question, options)?;

        match mode {
            EvaluateMode::Single => Ok(self.evaluate_single(&question).await),
            EvaluateMode::Multi => Ok(self.evaluate_multi(&question).await),
        }
    }

    /// Single mode: delegate to the primary gateway, no reconciliation
    async fn evaluate_single(&self, question: &QuizQuestion) -> Evaluation {
        match self.gateways.first() {
            Some(primary) => {
                info!("Evaluating (single) via slot {}", primary.slot());
                Evaluation::Single(primary.answer(question, ASK_DEFAULT_CONFIDENCE).await)
            }
            None => {
                // Guarded fallback — a service with zero gateways is a
                // wiring bug, but we still answer
                warn!("No gateways configured; returning fallback answer");
                Evaluation::Quorum(reconcile(&[]))
            }
        }
    }

    /// Multi mode: fan out to every gateway concurrently, wait for all,
    /// then reconcile in slot priority order.
    ///
    /// Each gateway owns its provider's failure isolation and timeout;
    /// the aggregator imposes no deadline of its own and cancels
    /// nothing when a sibling fails.
    async fn evaluate_multi(&self, question: &QuizQuestion) -> Evaluation {
        info!(
            "Evaluating (multi) across {} providers: {}",
            self.gateways.len(),
            question
        );

        let mut join_set = JoinSet::new();

        for gateway in &self.gateways {
            let gateway = Arc::clone(gateway);
            let question = question.clone();

            join_set.spawn(async move {
                let answer = gateway.answer(&question, QUORUM_DEFAULT_CONFIDENCE).await;
                (gateway.slot(), answer)
            });
        }

        let mut collected: Vec<(quiz_domain::ProviderSlot, ProviderAnswer)> = Vec::new();

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((slot, answer)) => collected.push((slot, answer)),
                Err(e) => {
                    // A panicked gateway task yields no result; the
                    // degenerate guard in reconcile() covers the
                    // nothing-at-all case
                    warn!("Gateway task join error: {}", e);
                }
            }
        }

        // Completion order is arbitrary; reconciliation tie-breaking
        // expects slot priority order
        collected.sort_by_key(|(slot, _)| slot.priority());
        let responses: Vec<ProviderAnswer> =
            collected.into_iter().map(|(_, answer)| answer).collect();

        let quorum = reconcile(&responses);
        info!(
            "Multi-provider evaluation complete: {} successful, {} errors, consensus: {}",
            quorum.report.success_count(),
            quorum.report.error_count(),
            quorum.report.consensus
        );

        Evaluation::Quorum(quorum)
    }
}
