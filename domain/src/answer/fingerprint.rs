//! Cache fingerprint derivation

use crate::core::question::QuizQuestion;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Deterministic cache key for a (question, options) pair
///
/// A pure function of the question text and the ordered option list:
/// the same inputs always produce the same fingerprint, including
/// across restarts. Reordering options produces a different
/// fingerprint, since the option letters are positional.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Derive the fingerprint for a question
    pub fn of(question: &QuizQuestion) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(question.question().as_bytes());
        for option in question.options() {
            hasher.update(b"|");
            hasher.update(option.as_bytes());
        }
        let digest = hasher.finalize();
        Self(format!("{:x}", digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
