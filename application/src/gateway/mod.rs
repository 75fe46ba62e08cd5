//! Provider gateway
//!
//! One gateway per provider slot. A gateway owns the prompt template,
//! consults the answer cache before every external call, and isolates
//! its provider's failures: `answer()` never raises.

mod prompt;
mod provider_gateway;

pub use prompt::{build_prompt, SYSTEM_INSTRUCTION};
pub use provider_gateway::ProviderGateway;
