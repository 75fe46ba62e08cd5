//! Domain layer for quiz-quorum
//!
//! Pure business logic with no I/O: questions, answer letters, provider
//! results, cache fingerprints, reply parsing, and consensus
//! reconciliation. Everything here is deterministic and synchronous;
//! the application layer owns orchestration and the infrastructure
//! layer owns external providers and storage.

pub mod answer;
pub mod consensus;
pub mod core;
pub mod reply;

// Re-export main types at the crate root
pub use answer::{AnswerLetter, Fingerprint, ProviderAnswer, ProviderSlot};
pub use consensus::{reconcile, ConsensusReport, Evaluation, Highlight, QuorumAnswer};
pub use core::{DomainError, QuizQuestion};
pub use reply::{ParsedReply, ReplyParser, ASK_DEFAULT_CONFIDENCE, QUORUM_DEFAULT_CONFIDENCE};
