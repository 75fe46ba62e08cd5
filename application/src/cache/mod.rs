//! Per-provider answer cache
//!
//! Bounded, insertion-ordered maps from question fingerprint to
//! structured answer, one per provider slot, with FIFO eviction and
//! durable JSON documents behind the [`CacheStore`] port.
//!
//! Mutation happens synchronously on the calling path; persistence of
//! a mutation happens off-path in a background task and never blocks
//! the caller. At most one save task per slot is in flight at a time:
//! an insert racing an active save marks the slot dirty, and the task
//! re-runs with a fresh snapshot after its write, so inserts racing a
//! save are never lost and writes for a slot never overlap.

mod manager;

pub use manager::{AnswerCache, CacheStats, DEFAULT_CAPACITY};
