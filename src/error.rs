use thiserror::Error;

/// Errors that can occur while generating a recipe.
///
/// Parsing never fails; every variant here comes from the layers around the
/// parser (HTTP transport, provider payloads, configuration, input checks).
#[derive(Error, Debug)]
pub enum GenerateError {
    /// HTTP request to the provider failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Provider sent a payload that is not valid JSON
    #[error("Invalid provider payload: {0}")]
    PayloadError(#[from] serde_json::Error),

    /// The recipe request is missing required input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// The stream broke off after some text had already arrived
    #[error("Stream interrupted after {} bytes: {message}", partial.len())]
    StreamInterrupted { partial: String, message: String },

    /// Reading a local file failed
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvError(#[from] std::env::VarError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
