//! Completion provider adapters
//!
//! Two HTTP adapter families cover the three slots: the
//! OpenAI-compatible chat-completions protocol (first and third slots,
//! with different base URLs) and the Gemini generateContent protocol
//! (second slot).
//!
//! Credentials are resolved from the environment when an adapter is
//! constructed; a missing key is carried and only becomes an error at
//! the first call to that specific provider.

mod gemini;
mod openai_compat;

pub use gemini::{GeminiAdapter, GEMINI_BASE_URL};
pub use openai_compat::{OpenAiCompatAdapter, OPENAI_BASE_URL};

/// Max tokens requested per completion
pub(crate) const MAX_TOKENS: u32 = 150;

/// Low temperature for answer consistency
pub(crate) const TEMPERATURE: f64 = 0.1;

/// Resolve an API key from the environment at construction time
pub(crate) fn resolve_key(env_var: &str) -> Option<String> {
    std::env::var(env_var).ok().filter(|v| !v.trim().is_empty())
}
