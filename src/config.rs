use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Provider used when the caller does not pick one
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Request timeout in seconds, covering the whole streamed response
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: HashMap::new(),
            timeout: default_timeout(),
        }
    }
}

/// Configuration for a specific LLM provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "gemini-2.5-flash", "gpt-4o-mini");
    /// empty means the provider's built-in model
    #[serde(default)]
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
    /// Ground the answer with the provider's web search tool, where supported
    #[serde(default = "default_web_search")]
    pub web_search: bool,
    /// Thinking token budget (Gemini); -1 lets the model decide
    pub thinking_budget: Option<i32>,
}

impl ProviderConfig {
    /// Built-in settings for a known provider, used when the config file has none.
    pub fn defaults_for(provider_name: &str) -> Option<Self> {
        let (model, thinking_budget) = match provider_name {
            "google" => ("gemini-2.5-flash", Some(-1)),
            "openai" => ("gpt-4o-mini", None),
            _ => return None,
        };

        Some(ProviderConfig {
            enabled: true,
            model: model.to_string(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
            web_search: default_web_search(),
            thinking_budget,
        })
    }
}

// Default value functions
fn default_provider() -> String {
    "google".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    8192
}

fn default_web_search() -> bool {
    true
}

fn default_timeout() -> u64 {
    120
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_STREAM__ prefix
    /// 2. recipe-stream.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_STREAM__PROVIDERS__GOOGLE__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Settings for `provider_name`: the configured entry, else built-in defaults.
    pub fn provider(&self, provider_name: &str) -> Option<ProviderConfig> {
        let defaults = ProviderConfig::defaults_for(provider_name);
        match self.providers.get(provider_name).cloned() {
            Some(mut configured) => {
                if configured.model.is_empty() {
                    if let Some(defaults) = defaults {
                        configured.model = defaults.model;
                    }
                }
                Some(configured)
            }
            None => defaults,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-stream").required(false))
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}

/// Use double underscore for nested: RECIPE_STREAM__PROVIDERS__GOOGLE__API_KEY
fn environment() -> Environment {
    Environment::with_prefix("RECIPE_STREAM")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
