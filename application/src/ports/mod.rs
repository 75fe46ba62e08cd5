//! Ports (interfaces) for the application layer
//!
//! Implementations (adapters) live in the infrastructure layer.

pub mod cache_store;
pub mod completion;
