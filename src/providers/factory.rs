use std::time::Duration;

use log::info;

use crate::config::{AppConfig, ProviderConfig};
use crate::providers::{GeminiProvider, LlmProvider, OpenAIProvider};
use crate::GenerateError;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Box<dyn LlmProvider>, GenerateError> {
        // Validate that provider is enabled
        if !config.enabled {
            return Err(GenerateError::BuilderError(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )));
        }

        match provider_name {
            "google" => Ok(Box::new(GeminiProvider::new(config, timeout)?)),
            "openai" => Ok(Box::new(OpenAIProvider::new(config, timeout)?)),
            _ => Err(GenerateError::BuilderError(format!(
                "Unknown provider: {} (available: {})",
                provider_name,
                Self::available_providers().join(", ")
            ))),
        }
    }

    /// Get the default provider from configuration
    pub fn get_default_provider(config: &AppConfig) -> Result<Box<dyn LlmProvider>, GenerateError> {
        Self::from_config(&config.default_provider, config)
    }

    /// Create a named provider using its configured (or built-in) settings
    pub fn from_config(
        provider_name: &str,
        config: &AppConfig,
    ) -> Result<Box<dyn LlmProvider>, GenerateError> {
        let provider_config = config.provider(provider_name).ok_or_else(|| {
            GenerateError::BuilderError(format!(
                "Provider '{}' not found in configuration",
                provider_name
            ))
        })?;

        info!("Using provider '{}' ({})", provider_name, provider_config.model);
        Self::create(provider_name, &provider_config, config.timeout())
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["google", "openai"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn create_test_provider_config() -> ProviderConfig {
        ProviderConfig {
            enabled: true,
            model: "test-model".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            api_key: Some("test-key".to_string()),
            base_url: None,
            web_search: true,
            thinking_budget: None,
        }
    }

    fn timeout() -> Duration {
        Duration::from_secs(10)
    }

    #[test]
    fn test_create_google_provider() {
        let config = create_test_provider_config();
        let provider = ProviderFactory::create("google", &config, timeout()).unwrap();
        assert_eq!(provider.provider_name(), "google");
    }

    #[test]
    fn test_create_openai_provider() {
        let config = create_test_provider_config();
        let provider = ProviderFactory::create("openai", &config, timeout()).unwrap();
        assert_eq!(provider.provider_name(), "openai");
    }

    #[test]
    fn test_create_unknown_provider() {
        let config = create_test_provider_config();
        let result = ProviderFactory::create("unknown", &config, timeout());
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("Unknown provider"));
            assert!(e.to_string().contains("available: google, openai"));
        }
    }

    #[test]
    fn test_create_disabled_provider() {
        let mut config = create_test_provider_config();
        config.enabled = false;

        let result = ProviderFactory::create("google", &config, timeout());
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("not enabled in configuration"));
        }
    }

    #[test]
    fn test_get_default_provider() {
        let mut providers = HashMap::new();
        providers.insert("openai".to_string(), create_test_provider_config());

        let app_config = AppConfig {
            default_provider: "openai".to_string(),
            providers,
            timeout: 30,
        };

        let provider = ProviderFactory::get_default_provider(&app_config).unwrap();
        assert_eq!(provider.provider_name(), "openai");
    }

    #[test]
    fn test_get_default_provider_not_found() {
        let app_config = AppConfig {
            default_provider: "mistral".to_string(),
            providers: HashMap::new(),
            timeout: 30,
        };

        let result = ProviderFactory::get_default_provider(&app_config);
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("not found"));
        }
    }

    #[test]
    fn test_available_providers() {
        let providers = ProviderFactory::available_providers();
        assert_eq!(providers, vec!["google", "openai"]);
    }
}
