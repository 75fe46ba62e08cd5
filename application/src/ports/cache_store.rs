//! Cache store port
//!
//! Defines how cache snapshots are persisted: one textual document per
//! provider slot, mapping fingerprint to the answer's full fields.

use async_trait::async_trait;
use indexmap::IndexMap;
use quiz_domain::{ProviderAnswer, ProviderSlot};
use thiserror::Error;

/// One provider slot's durable document: fingerprint -> answer,
/// in insertion order so FIFO eviction order survives a reload
pub type CacheDocument = IndexMap<String, ProviderAnswer>;

/// Errors from the durable store
///
/// Store failures are non-fatal: the cache logs them and keeps
/// operating in memory, accepting the durability loss.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable storage for per-slot cache documents
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Load a slot's document; a missing document yields an empty map
    async fn load(&self, slot: ProviderSlot) -> Result<CacheDocument, StoreError>;

    /// Write a full snapshot of a slot's document
    async fn save(&self, slot: ProviderSlot, entries: &CacheDocument) -> Result<(), StoreError>;

    /// Delete a slot's document, if present
    async fn delete(&self, slot: ProviderSlot) -> Result<(), StoreError>;
}
