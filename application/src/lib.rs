//! Application layer for quiz-quorum
//!
//! Use cases and ports. The answer cache, provider gateways, and the
//! consensus aggregator live here; concrete provider adapters and the
//! durable store live in the infrastructure layer behind the
//! [`ports::CompletionPort`] and [`ports::CacheStore`] traits.

pub mod cache;
pub mod gateway;
pub mod ports;
pub mod use_cases;

// Re-export main types
pub use cache::{AnswerCache, CacheStats};
pub use gateway::ProviderGateway;
pub use ports::cache_store::{CacheDocument, CacheStore, StoreError};
pub use ports::completion::{CompletionPort, GatewayError};
pub use use_cases::evaluate::{EvaluateError, EvaluateMode, EvaluateQuestionUseCase};
