//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Question must have between {min} and {max} options, got {got}")]
    InvalidOptionCount { min: usize, max: usize, got: usize },
}
