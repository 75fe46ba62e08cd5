//! Provider gateway implementation

use crate::cache::AnswerCache;
use crate::gateway::prompt::{build_prompt, SYSTEM_INSTRUCTION};
use crate::ports::completion::CompletionPort;
use quiz_domain::{Fingerprint, ProviderAnswer, ProviderSlot, QuizQuestion, ReplyParser};
use std::sync::Arc;
use tracing::{debug, warn};

/// Gateway to one external provider, with the answer cache in front
///
/// Constructed once at service start and shared by reference; there are
/// no lazily-initialized globals. Each gateway isolates its provider's
/// failures — `answer()` always returns a [`ProviderAnswer`], flagged
/// with `error = true` when the call failed.
pub struct ProviderGateway {
    slot: ProviderSlot,
    port: Arc<dyn CompletionPort>,
    cache: Arc<AnswerCache>,
}

impl ProviderGateway {
    pub fn new(slot: ProviderSlot, port: Arc<dyn CompletionPort>, cache: Arc<AnswerCache>) -> Self {
        Self { slot, port, cache }
    }

    /// The slot this gateway serves
    pub fn slot(&self) -> ProviderSlot {
        self.slot
    }

    /// Ask the provider to answer a question.
    ///
    /// A cache hit short-circuits the external call. A successful call
    /// is parsed with the given default confidence and stored before
    /// being returned. Any failure yields an error-flagged answer with
    /// this slot's fallback letter — never an error.
    pub async fn answer(&self, question: &QuizQuestion, default_confidence: u8) -> ProviderAnswer {
        let fingerprint = Fingerprint::of(question);

        if let Some(cached) = self.cache.get(self.slot, &fingerprint) {
            debug!(
                "Cache hit for slot {} ({})",
                self.slot,
                fingerprint.as_str()
            );
            return cached;
        }

        let prompt = build_prompt(question);
        let model = self.port.model().to_string();

        match self.port.complete(SYSTEM_INSTRUCTION, &prompt).await {
            Ok(reply) => {
                let parsed = ReplyParser::new(default_confidence).parse(&reply);
                let answer = ProviderAnswer::success(
                    model,
                    parsed.answer,
                    parsed.confidence,
                    reply,
                    parsed.reasoning,
                );
                self.cache.put(self.slot, fingerprint, answer.clone());
                answer
            }
            Err(e) if e.is_content_blocked() => {
                warn!("Slot {} reply blocked: {}", self.slot, e);
                ProviderAnswer::blocked(model, self.slot, e.to_string())
            }
            Err(e) => {
                warn!("Slot {} provider call failed: {}", self.slot, e);
                ProviderAnswer::failure(model, self.slot, e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::cache_store::{CacheDocument, CacheStore, StoreError};
    use crate::ports::completion::GatewayError;
    use async_trait::async_trait;
    use quiz_domain::{AnswerLetter, QUORUM_DEFAULT_CONFIDENCE};
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ==================== Test mocks ====================

    struct NullStore;

    #[async_trait]
    impl CacheStore for NullStore {
        async fn load(&self, _slot: ProviderSlot) -> Result<CacheDocument, StoreError> {
            Ok(CacheDocument::default())
        }

        async fn save(
            &self,
            _slot: ProviderSlot,
            _entries: &CacheDocument,
        ) -> Result<(), StoreError> {
            Ok(())
        }

        async fn delete(&self, _slot: ProviderSlot) -> Result<(), StoreError> {
            Ok(())
        }
    }

    struct MockPort {
        reply: Result<String, fn() -> GatewayError>,
        calls: AtomicUsize,
    }

    impl MockPort {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(make: fn() -> GatewayError) -> Self {
            Self {
                reply: Err(make),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionPort for MockPort {
        fn model(&self) -> &str {
            "mock-model"
        }

        async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    fn question() -> QuizQuestion {
        QuizQuestion::new(
            "Capital of France?",
            vec!["Paris".to_string(), "Rome".to_string()],
        )
        .unwrap()
    }

    async fn cache() -> Arc<AnswerCache> {
        AnswerCache::load(Arc::new(NullStore), 10).await
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_successful_call_is_parsed_and_cached() {
        let port = Arc::new(MockPort::replying(
            "Answer: A\nConfidence: 9\nReasoning: Paris is the capital",
        ));
        let cache = cache().await;
        let gateway =
            ProviderGateway::new(ProviderSlot::First, Arc::clone(&port) as _, Arc::clone(&cache));

        let answer = gateway.answer(&question(), QUORUM_DEFAULT_CONFIDENCE).await;

        assert!(!answer.error);
        assert_eq!(answer.answer, AnswerLetter::A);
        assert_eq!(answer.confidence, 9);
        assert_eq!(answer.reasoning, "Paris is the capital");
        assert_eq!(answer.provider, "mock-model");

        let fp = Fingerprint::of(&question());
        assert!(cache.get(ProviderSlot::First, &fp).is_some());
    }

    #[tokio::test]
    async fn test_cache_hit_short_circuits_provider() {
        let port = Arc::new(MockPort::replying("Answer: B\nConfidence: 8"));
        let gateway = ProviderGateway::new(
            ProviderSlot::Second,
            Arc::clone(&port) as _,
            cache().await,
        );

        let first = gateway.answer(&question(), QUORUM_DEFAULT_CONFIDENCE).await;
        let second = gateway.answer(&question(), QUORUM_DEFAULT_CONFIDENCE).await;

        assert_eq!(port.calls(), 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_failure_returns_flagged_answer_without_caching() {
        let port = Arc::new(MockPort::failing(|| {
            GatewayError::RequestFailed("connection refused".to_string())
        }));
        let cache = cache().await;
        let gateway = ProviderGateway::new(
            ProviderSlot::Third,
            Arc::clone(&port) as _,
            Arc::clone(&cache),
        );

        let answer = gateway.answer(&question(), QUORUM_DEFAULT_CONFIDENCE).await;

        assert!(answer.error);
        assert_eq!(answer.answer, ProviderSlot::Third.fallback_letter());
        assert_eq!(answer.confidence, 1);
        assert!(answer.raw.contains("connection refused"));

        // Errors are never cached, so a retry hits the provider again
        gateway.answer(&question(), QUORUM_DEFAULT_CONFIDENCE).await;
        assert_eq!(port.calls(), 2);
    }

    #[tokio::test]
    async fn test_content_blocked_has_zero_confidence() {
        let port = Arc::new(MockPort::failing(|| {
            GatewayError::ContentBlocked("SAFETY".to_string())
        }));
        let gateway =
            ProviderGateway::new(ProviderSlot::Second, Arc::clone(&port) as _, cache().await);

        let answer = gateway.answer(&question(), QUORUM_DEFAULT_CONFIDENCE).await;

        assert!(answer.error);
        assert_eq!(answer.confidence, 0);
        assert_eq!(answer.answer, ProviderSlot::Second.fallback_letter());
    }

    #[tokio::test]
    async fn test_missing_credential_surfaces_as_flagged_answer() {
        let port = Arc::new(MockPort::failing(|| {
            GatewayError::MissingCredential("OPENAI_API_KEY".to_string())
        }));
        let gateway =
            ProviderGateway::new(ProviderSlot::First, Arc::clone(&port) as _, cache().await);

        let answer = gateway.answer(&question(), QUORUM_DEFAULT_CONFIDENCE).await;

        assert!(answer.error);
        assert!(answer.raw.contains("OPENAI_API_KEY"));
    }
}
