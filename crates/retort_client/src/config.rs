//! API endpoint configuration.

use derive_getters::Getters;
use retort_error::ConfigError;

/// Settings for the upstream chat-completion endpoint.
///
/// Read once from the process environment and never mutated afterwards.
#[derive(Debug, Clone, Getters)]
pub struct ApiConfig {
    /// Full URL of the chat-completions endpoint
    api_base_url: String,
    /// Bearer token for authentication
    api_key: String,
    /// Model identifier
    model: String,
}

impl ApiConfig {
    /// Creates a config from explicit values.
    pub fn new(
        api_base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Reads the config from the environment.
    ///
    /// Reads:
    /// - `API_BASE_URL`
    /// - `API_KEY`
    /// - `MODEL`
    ///
    /// Missing variables are read as empty strings; use [`Self::validate`]
    /// before any network call.
    pub fn from_env() -> Self {
        Self {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or_default(),
            api_key: std::env::var("API_KEY").unwrap_or_default(),
            model: std::env::var("MODEL").unwrap_or_default(),
        }
    }

    /// True iff every setting is non-empty.
    pub fn is_valid(&self) -> bool {
        !self.api_base_url.is_empty() && !self.api_key.is_empty() && !self.model.is_empty()
    }

    /// Names of the settings that are still empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_base_url.is_empty() {
            missing.push("API_BASE_URL");
        }
        if self.api_key.is_empty() {
            missing.push("API_KEY");
        }
        if self.model.is_empty() {
            missing.push("MODEL");
        }
        missing
    }

    /// Fails with a [`ConfigError`] naming the missing settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::missing_fields(&missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_config_is_valid() {
        let config = ApiConfig::new("https://api.example.com/v1/chat", "sk-test", "test-model");
        assert!(config.is_valid());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_names_missing_fields() {
        let config = ApiConfig::new("", "sk-test", "");
        assert!(!config.is_valid());

        let err = config.validate().unwrap_err();
        assert!(err.message.contains("API_BASE_URL"));
        assert!(err.message.contains("MODEL"));
        assert!(!err.message.contains("API_KEY"));
    }
}
