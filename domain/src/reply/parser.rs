//! Reply parser implementation

use crate::answer::AnswerLetter;
use regex::Regex;
use std::sync::LazyLock;

static ANSWER_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)answer:\s*([A-Da-d])").expect("valid regex"));

static ISOLATED_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Da-d])\b").expect("valid regex"));

static ANY_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Da-d])").expect("valid regex"));

/// Confidence extraction patterns, tried in order
static CONFIDENCE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)confidence:\s*(\d+)",
        r"(?i)confidence\s+level:\s*(\d+)",
        r"(\d+)\s*/\s*10",
        r"(?i)(\d+)\s*out\s*of\s*10",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// Reasoning extraction patterns, tried in order; each captures through
/// the end of the line
static REASONING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)reasoning:\s*([^\n]+)",
        r"(?i)explanation:\s*([^\n]+)",
        r"(?i)justification:\s*([^\n]+)",
        r"(?i)because:\s*([^\n]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// Fallback: everything after the confidence line
static AFTER_CONFIDENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)confidence:\s*\d+\s*(.+)").expect("valid regex"));

/// Minimum length for the after-confidence fallback to count as reasoning
const MIN_REASONING_LEN: usize = 10;

const NO_REASONING: &str = "No reasoning provided";

/// Structured triple extracted from a provider reply
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReply {
    pub answer: AnswerLetter,
    pub confidence: u8,
    pub reasoning: String,
}

/// Parser for free-form provider replies
///
/// Providers are asked for `Answer:` / `Confidence:` / `Reasoning:`
/// lines, but the parser tolerates arbitrary prose and never assumes a
/// structured-output mode. The configured default confidence is used
/// when no confidence pattern matches.
///
/// # Example
///
/// ```
/// use quiz_domain::reply::{ReplyParser, QUORUM_DEFAULT_CONFIDENCE};
/// use quiz_domain::answer::AnswerLetter;
///
/// let parser = ReplyParser::new(QUORUM_DEFAULT_CONFIDENCE);
/// let parsed = parser.parse("Answer: B\nConfidence: 7\nReasoning: because X");
/// assert_eq!(parsed.answer, AnswerLetter::B);
/// assert_eq!(parsed.confidence, 7);
/// assert_eq!(parsed.reasoning, "because X");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ReplyParser {
    default_confidence: u8,
}

impl ReplyParser {
    pub fn new(default_confidence: u8) -> Self {
        Self { default_confidence }
    }

    /// Parse a reply into a structured triple. Never fails.
    pub fn parse(&self, text: &str) -> ParsedReply {
        ParsedReply {
            answer: Self::extract_answer(text),
            confidence: self.extract_confidence(text),
            reasoning: Self::extract_reasoning(text),
        }
    }

    /// Layered answer extraction: explicit label, then the first
    /// isolated letter token, then the first A-D character anywhere,
    /// then the default A.
    fn extract_answer(text: &str) -> AnswerLetter {
        let labeled = ANSWER_LABEL
            .captures(text)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().chars().next())
            .and_then(AnswerLetter::from_char);
        if let Some(answer) = labeled {
            return answer;
        }

        let isolated = ISOLATED_LETTER
            .captures(text)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().chars().next())
            .and_then(AnswerLetter::from_char);
        if let Some(answer) = isolated {
            return answer;
        }

        ANY_LETTER
            .captures(text)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().chars().next())
            .and_then(AnswerLetter::from_char)
            .unwrap_or(AnswerLetter::A)
    }

    /// Try each confidence pattern in order, clamping hits to 1-10.
    fn extract_confidence(&self, text: &str) -> u8 {
        for pattern in CONFIDENCE_PATTERNS.iter() {
            if let Some(captures) = pattern.captures(text)
                && let Some(m) = captures.get(1)
                && let Ok(n) = m.as_str().parse::<u32>()
            {
                return n.clamp(1, 10) as u8;
            }
        }
        self.default_confidence
    }

    /// Labeled reasoning line, else substantial text after the
    /// confidence line, else the placeholder.
    fn extract_reasoning(text: &str) -> String {
        for pattern in REASONING_PATTERNS.iter() {
            if let Some(captures) = pattern.captures(text)
                && let Some(m) = captures.get(1)
            {
                let reasoning = m.as_str().trim();
                if !reasoning.is_empty() {
                    return reasoning.to_string();
                }
            }
        }

        if let Some(captures) = AFTER_CONFIDENCE.captures(text)
            && let Some(m) = captures.get(1)
        {
            let trailing = m.as_str().trim();
            if trailing.len() > MIN_REASONING_LEN {
                return trailing.to_string();
            }
        }

        NO_REASONING.to_string()
    }
}
