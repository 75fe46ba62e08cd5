//! Quiz question value object

use crate::answer::AnswerLetter;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Minimum number of answer options
pub const MIN_OPTIONS: usize = 2;

/// Maximum number of answer options
pub const MAX_OPTIONS: usize = 4;

/// A multiple-choice question to be answered by the providers (Value Object)
///
/// Holds the question text plus 2-4 answer options. Options are lettered
/// by position (A, B, C, D) — the letter is not stored, it is derived
/// from the option's index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    question: String,
    options: Vec<String>,
}

impl QuizQuestion {
    /// Create a new question, validating the option count.
    ///
    /// This is the only structural validation the aggregator performs:
    /// a question outside the 2-4 option range is rejected here and
    /// never reaches a provider.
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
    ) -> Result<Self, DomainError> {
        let question = question.into();
        if question.trim().is_empty() {
            return Err(DomainError::InvalidQuestion(
                "question text cannot be empty".to_string(),
            ));
        }
        if options.len() < MIN_OPTIONS || options.len() > MAX_OPTIONS {
            return Err(DomainError::InvalidOptionCount {
                min: MIN_OPTIONS,
                max: MAX_OPTIONS,
                got: options.len(),
            });
        }
        Ok(Self { question, options })
    }

    /// Get the question text
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Get the answer options in order
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Iterate over options paired with their position letter
    pub fn lettered_options(&self) -> impl Iterator<Item = (AnswerLetter, &str)> {
        self.options.iter().enumerate().map(|(i, opt)| {
            // Index is bounded by MAX_OPTIONS, so the letter always exists
            let letter = AnswerLetter::from_index(i).unwrap_or(AnswerLetter::A);
            (letter, opt.as_str())
        })
    }
}

impl std::fmt::Display for QuizQuestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("option {}", i)).collect()
    }

    #[test]
    fn test_question_creation() {
        let q = QuizQuestion::new("Capital of France?", options(4)).unwrap();
        assert_eq!(q.question(), "Capital of France?");
        assert_eq!(q.options().len(), 4);
    }

    #[test]
    fn test_two_options_is_valid() {
        assert!(QuizQuestion::new("True or false?", options(2)).is_ok());
    }

    #[test]
    fn test_too_few_options() {
        let err = QuizQuestion::new("Pick one", options(1)).unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidOptionCount { got: 1, .. }
        ));
    }

    #[test]
    fn test_too_many_options() {
        assert!(QuizQuestion::new("Pick one", options(5)).is_err());
    }

    #[test]
    fn test_empty_question_text() {
        assert!(QuizQuestion::new("   ", options(3)).is_err());
    }

    #[test]
    fn test_lettered_options() {
        let q = QuizQuestion::new("Q", options(3)).unwrap();
        let lettered: Vec<_> = q.lettered_options().collect();
        assert_eq!(lettered[0].0, AnswerLetter::A);
        assert_eq!(lettered[1].0, AnswerLetter::B);
        assert_eq!(lettered[2].0, AnswerLetter::C);
        assert_eq!(lettered[2].1, "option 2");
    }
}
