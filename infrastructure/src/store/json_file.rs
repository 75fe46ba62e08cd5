//! JSON file cache store
//!
//! One pretty-printed JSON document per provider slot, mapping
//! fingerprint to the answer's full fields. Documents are
//! single-writer, single-process artifacts; no cross-process
//! coordination is attempted.

use async_trait::async_trait;
use quiz_application::ports::cache_store::{CacheDocument, CacheStore, StoreError};
use quiz_domain::ProviderSlot;
use std::path::PathBuf;
use tracing::debug;

/// File-backed cache store rooted at a cache directory
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Path of a slot's document (e.g. `first_cache.json`)
    pub fn document_path(&self, slot: ProviderSlot) -> PathBuf {
        self.dir.join(format!("{}_cache.json", slot.name()))
    }
}

#[async_trait]
impl CacheStore for JsonFileStore {
    async fn load(&self, slot: ProviderSlot) -> Result<CacheDocument, StoreError> {
        let path = self.document_path(slot);

        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(
                    "Cache document {} does not exist, starting empty",
                    path.display()
                );
                return Ok(CacheDocument::default());
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        let entries: CacheDocument = serde_json::from_str(&contents)?;
        debug!(
            "Loaded {} entries from {}",
            entries.len(),
            path.display()
        );
        Ok(entries)
    }

    async fn save(&self, slot: ProviderSlot, entries: &CacheDocument) -> Result<(), StoreError> {
        let path = self.document_path(slot);
        let contents = serde_json::to_string_pretty(entries)?;
        tokio::fs::write(&path, contents).await?;
        debug!("Saved {} entries to {}", entries.len(), path.display());
        Ok(())
    }

    async fn delete(&self, slot: ProviderSlot) -> Result<(), StoreError> {
        let path = self.document_path(slot);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_domain::{AnswerLetter, ProviderAnswer};

    fn answer(confidence: u8) -> ProviderAnswer {
        ProviderAnswer::success(
            "gpt-4.1",
            AnswerLetter::C,
            confidence,
            "Answer: C\nConfidence: 9",
            "Paris is the capital of France.",
        )
    }

    #[tokio::test]
    async fn test_roundtrip_reproduces_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        let mut doc = CacheDocument::default();
        doc.insert("fp-1".to_string(), answer(9));
        doc.insert("fp-2".to_string(), answer(3));

        store.save(ProviderSlot::First, &doc).await.unwrap();
        let loaded = store.load(ProviderSlot::First).await.unwrap();

        assert_eq!(loaded, doc);
        // Insertion order is preserved by the document
        let keys: Vec<_> = loaded.keys().collect();
        assert_eq!(keys, vec!["fp-1", "fp-2"]);
    }

    #[tokio::test]
    async fn test_missing_document_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        let loaded = store.load(ProviderSlot::Second).await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        tokio::fs::write(store.document_path(ProviderSlot::Third), "{ not json")
            .await
            .unwrap();

        let result = store.load(ProviderSlot::Third).await;
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_document_and_tolerates_absence() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        let mut doc = CacheDocument::default();
        doc.insert("fp".to_string(), answer(5));
        store.save(ProviderSlot::First, &doc).await.unwrap();
        assert!(store.document_path(ProviderSlot::First).exists());

        store.delete(ProviderSlot::First).await.unwrap();
        assert!(!store.document_path(ProviderSlot::First).exists());

        // Deleting again is a no-op
        store.delete(ProviderSlot::First).await.unwrap();
    }

    #[tokio::test]
    async fn test_documents_are_human_readable_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        let mut doc = CacheDocument::default();
        doc.insert("fp".to_string(), answer(7));
        store.save(ProviderSlot::Second, &doc).await.unwrap();

        let text = tokio::fs::read_to_string(store.document_path(ProviderSlot::Second))
            .await
            .unwrap();
        assert!(text.contains("\"provider\": \"gpt-4.1\""));
        assert!(text.contains("\"answer\": \"C\""));
        assert!(text.contains('\n')); // pretty-printed
    }

    #[test]
    fn test_document_paths_per_slot() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();
        assert!(store
            .document_path(ProviderSlot::First)
            .ends_with("first_cache.json"));
        assert!(store
            .document_path(ProviderSlot::Third)
            .ends_with("third_cache.json"));
    }
}
