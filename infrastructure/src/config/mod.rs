//! Configuration loading and file formats

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileCacheConfig, FileConfig, FileProviderConfig, FileProvidersConfig,
};
pub use loader::ConfigLoader;
