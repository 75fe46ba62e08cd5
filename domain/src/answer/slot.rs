//! Provider slot value object

use crate::answer::letter::AnswerLetter;
use serde::{Deserialize, Serialize};

/// One of the three provider slots in the quorum
///
/// Slots are positional, not tied to any concrete vendor: the first slot
/// is the designated primary for single mode, and priority order
/// (first > second > third) breaks confidence ties during
/// reconciliation.
///
/// Each slot carries a distinct fallback letter used only when that
/// provider fails. The letters differ deliberately so that "every
/// provider failed" never masquerades as unanimous agreement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ProviderSlot {
    First,
    Second,
    Third,
}

impl ProviderSlot {
    /// All slots in priority order
    pub const ALL: [ProviderSlot; 3] = [
        ProviderSlot::First,
        ProviderSlot::Second,
        ProviderSlot::Third,
    ];

    /// Stable name used for cache documents and logging
    pub fn name(&self) -> &'static str {
        match self {
            ProviderSlot::First => "first",
            ProviderSlot::Second => "second",
            ProviderSlot::Third => "third",
        }
    }

    /// Fallback answer letter returned when this provider fails
    pub fn fallback_letter(&self) -> AnswerLetter {
        match self {
            ProviderSlot::First => AnswerLetter::A,
            ProviderSlot::Second => AnswerLetter::B,
            ProviderSlot::Third => AnswerLetter::C,
        }
    }

    /// Priority rank (0 is highest)
    pub fn priority(&self) -> usize {
        match self {
            ProviderSlot::First => 0,
            ProviderSlot::Second => 1,
            ProviderSlot::Third => 2,
        }
    }
}

impl std::fmt::Display for ProviderSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_letters_are_distinct() {
        let letters: Vec<_> = ProviderSlot::ALL
            .iter()
            .map(|s| s.fallback_letter())
            .collect();
        assert_eq!(letters.len(), 3);
        assert!(letters.windows(2).all(|w| w[0] != w[1]));
        assert_ne!(letters[0], letters[2]);
    }

    #[test]
    fn test_priority_order_matches_all() {
        for (i, slot) in ProviderSlot::ALL.iter().enumerate() {
            assert_eq!(slot.priority(), i);
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ProviderSlot::Second).unwrap();
        assert_eq!(json, "\"second\"");
    }
}
