//! Consensus reconciliation domain
//!
//! Turns a set of per-provider answers into a single reconciled answer
//! with an honest consensus signal. The rule is strict: consensus is
//! reported only when every provider succeeded *and* every answer is
//! the identical letter. A partial failure is never reported as full
//! agreement, even if the surviving answers happen to agree.

pub mod reconcile;
pub mod report;

pub use reconcile::reconcile;
pub use report::{ConsensusReport, Evaluation, Highlight, QuorumAnswer};
