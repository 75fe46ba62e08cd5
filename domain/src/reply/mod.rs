//! Provider reply parsing
//!
//! Extracts a structured (answer, confidence, reasoning) triple from a
//! provider's free-form text. Pure domain logic — no I/O, no session
//! state, just layered text pattern matching.
//!
//! Parsing never fails: every extraction strategy has a fallback, and
//! a reply that matches nothing yields the safe default triple.

mod parser;

pub use parser::{ParsedReply, ReplyParser};

/// Default confidence when parsing fails on the single-provider path.
///
/// Deliberately distinct from [`QUORUM_DEFAULT_CONFIDENCE`]: a lone
/// provider's unparseable reply is still treated as a fairly confident
/// answer, while in quorum mode an unparseable reply should carry no
/// weight against parseable peers.
pub const ASK_DEFAULT_CONFIDENCE: u8 = 8;

/// Default confidence when parsing fails on the multi-provider path.
pub const QUORUM_DEFAULT_CONFIDENCE: u8 = 1;
