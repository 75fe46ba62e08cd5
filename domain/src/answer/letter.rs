//! Answer letter value object

use serde::{Deserialize, Serialize};

/// A multiple-choice answer letter (A-D)
///
/// Serializes as a single uppercase letter string, matching the durable
/// cache document format and provider reply conventions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum AnswerLetter {
    A,
    B,
    C,
    D,
}

impl AnswerLetter {
    /// All letters in option order
    pub const ALL: [AnswerLetter; 4] = [
        AnswerLetter::A,
        AnswerLetter::B,
        AnswerLetter::C,
        AnswerLetter::D,
    ];

    /// Letter for an option position (0 -> A, 3 -> D)
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse from a character, case-insensitive
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(AnswerLetter::A),
            'B' => Some(AnswerLetter::B),
            'C' => Some(AnswerLetter::C),
            'D' => Some(AnswerLetter::D),
            _ => None,
        }
    }

    /// The uppercase character for this letter
    pub fn as_char(&self) -> char {
        match self {
            AnswerLetter::A => 'A',
            AnswerLetter::B => 'B',
            AnswerLetter::C => 'C',
            AnswerLetter::D => 'D',
        }
    }
}

impl std::fmt::Display for AnswerLetter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl std::str::FromStr for AnswerLetter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                AnswerLetter::from_char(c).ok_or_else(|| format!("not an answer letter: {}", s))
            }
            _ => Err(format!("not an answer letter: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index() {
        assert_eq!(AnswerLetter::from_index(0), Some(AnswerLetter::A));
        assert_eq!(AnswerLetter::from_index(3), Some(AnswerLetter::D));
        assert_eq!(AnswerLetter::from_index(4), None);
    }

    #[test]
    fn test_from_char_case_insensitive() {
        assert_eq!(AnswerLetter::from_char('b'), Some(AnswerLetter::B));
        assert_eq!(AnswerLetter::from_char('E'), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("C".parse::<AnswerLetter>().unwrap(), AnswerLetter::C);
        assert_eq!(" d ".parse::<AnswerLetter>().unwrap(), AnswerLetter::D);
        assert!("AB".parse::<AnswerLetter>().is_err());
        assert!("".parse::<AnswerLetter>().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&AnswerLetter::B).unwrap();
        assert_eq!(json, "\"B\"");
        let back: AnswerLetter = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AnswerLetter::B);
    }
}
