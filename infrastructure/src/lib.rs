//! Infrastructure layer for quiz-quorum
//!
//! Concrete adapters behind the application layer's ports: HTTP
//! completion providers, the JSON file cache store, and configuration
//! loading.

pub mod config;
pub mod providers;
pub mod store;

// Re-export main types
pub use config::{ConfigLoader, FileConfig, FileProviderConfig};
pub use providers::{GeminiAdapter, OpenAiCompatAdapter};
pub use store::JsonFileStore;
