//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file
//! and are deserialized directly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("api_key_env cannot be empty")]
    EmptyKeyEnv,

    #[error("cache capacity cannot be 0")]
    ZeroCacheCapacity,
}

/// One provider slot from TOML (`[providers.first]` etc.)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Model name sent to the provider
    pub model: String,
    /// Environment variable name for the API key
    pub api_key_env: String,
    /// Base URL override (chat-completions providers only)
    pub base_url: Option<String>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            model: String::new(),
            api_key_env: String::new(),
            base_url: None,
        }
    }
}

/// Provider configuration from TOML (`[providers]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// First slot: OpenAI-compatible
    pub first: FileProviderConfig,
    /// Second slot: Gemini
    pub second: FileProviderConfig,
    /// Third slot: OpenAI-compatible (xAI by default)
    pub third: FileProviderConfig,
}

impl Default for FileProvidersConfig {
    fn default() -> Self {
        Self {
            first: FileProviderConfig {
                model: "gpt-4.1".to_string(),
                api_key_env: "OPENAI_API_KEY".to_string(),
                base_url: Some("https://api.openai.com/v1".to_string()),
            },
            second: FileProviderConfig {
                model: "gemini-2.5-pro".to_string(),
                api_key_env: "GEMINI_API_KEY".to_string(),
                base_url: None,
            },
            third: FileProviderConfig {
                model: "grok-4".to_string(),
                api_key_env: "XAI_API_KEY".to_string(),
                base_url: Some("https://api.x.ai/v1".to_string()),
            },
        }
    }
}

/// Cache configuration from TOML (`[cache]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCacheConfig {
    /// Directory for cache documents (default: platform cache dir)
    pub dir: Option<String>,
    /// Max entries per provider document
    pub capacity: usize,
}

impl Default for FileCacheConfig {
    fn default() -> Self {
        Self {
            dir: None,
            capacity: 10_000,
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Provider slot settings
    pub providers: FileProvidersConfig,
    /// Cache settings
    pub cache: FileCacheConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for slot in [
            &self.providers.first,
            &self.providers.second,
            &self.providers.third,
        ] {
            if slot.model.trim().is_empty() {
                return Err(ConfigValidationError::EmptyModelName);
            }
            if slot.api_key_env.trim().is_empty() {
                return Err(ConfigValidationError::EmptyKeyEnv);
            }
        }

        if self.cache.capacity == 0 {
            return Err(ConfigValidationError::ZeroCacheCapacity);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.providers.first.model, "gpt-4.1");
        assert_eq!(config.providers.second.model, "gemini-2.5-pro");
        assert_eq!(config.providers.third.model, "grok-4");
        assert_eq!(config.providers.third.api_key_env, "XAI_API_KEY");
        assert_eq!(config.cache.capacity, 10_000);
        assert!(config.cache.dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[providers.first]
model = "gpt-4o-mini"
api_key_env = "OPENAI_API_KEY"

[cache]
capacity = 50
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.providers.first.model, "gpt-4o-mini");
        // Untouched sections keep their defaults
        assert_eq!(config.providers.second.model, "gemini-2.5-pro");
        assert_eq!(config.providers.third.api_key_env, "XAI_API_KEY");
        assert_eq!(config.cache.capacity, 50);
        assert!(config.cache.dir.is_none());
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[providers.first]
model = "gpt-4.1"
api_key_env = "MY_OPENAI_KEY"
base_url = "https://proxy.example.com/v1"

[providers.second]
model = "gemini-2.0-flash"
api_key_env = "MY_GEMINI_KEY"

[providers.third]
model = "grok-3"
api_key_env = "MY_XAI_KEY"
base_url = "https://api.x.ai/v1"

[cache]
dir = "/tmp/quiz-cache"
capacity = 200
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.providers.first.api_key_env, "MY_OPENAI_KEY");
        assert_eq!(
            config.providers.first.base_url.as_deref(),
            Some("https://proxy.example.com/v1")
        );
        assert_eq!(config.providers.second.model, "gemini-2.0-flash");
        assert_eq!(config.cache.dir.as_deref(), Some("/tmp/quiz-cache"));
    }

    #[test]
    fn test_validate_empty_model_name() {
        let toml_str = r#"
[providers.second]
model = ""
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyModelName)
        ));
    }

    #[test]
    fn test_validate_zero_capacity() {
        let toml_str = r#"
[cache]
capacity = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::ZeroCacheCapacity)
        ));
    }
}
