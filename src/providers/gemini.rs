use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{debug, info};
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::ProviderConfig;
use crate::providers::sse::{check_status, SseTextStream};
use crate::providers::{build_recipe_prompt, LlmProvider, CHEF_PERSONA_PROMPT};
use crate::request::RecipeRequest;
use crate::stream::ChunkSource;
use crate::GenerateError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    web_search: bool,
    thinking_budget: Option<i32>,
}

impl GeminiProvider {
    /// Create a new Gemini provider from configuration
    pub fn new(config: &ProviderConfig, timeout: Duration) -> Result<Self, GenerateError> {
        // Try config first, then fall back to environment variable
        let api_key = match config.api_key.clone() {
            Some(key) => key,
            None => std::env::var("GEMINI_API_KEY")?,
        };

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(GeminiProvider {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            web_search: config.web_search,
            thinking_budget: config.thinking_budget,
        })
    }

    fn request_body(&self, request: &RecipeRequest) -> Value {
        let mut parts = Vec::new();
        if let Some(image) = request.image() {
            parts.push(json!({
                "inlineData": {
                    "mimeType": image.mime_type,
                    "data": STANDARD.encode(&image.data),
                }
            }));
        }
        parts.push(json!({ "text": build_recipe_prompt(request) }));

        let mut generation_config = json!({
            "temperature": self.temperature,
            "maxOutputTokens": self.max_tokens,
        });
        if let Some(budget) = self.thinking_budget {
            generation_config["thinkingConfig"] = json!({ "thinkingBudget": budget });
        }

        let mut body = json!({
            "systemInstruction": { "parts": [{ "text": CHEF_PERSONA_PROMPT }] },
            "contents": [{ "role": "user", "parts": parts }],
            "generationConfig": generation_config,
        });
        if self.web_search {
            body["tools"] = json!([{ "google_search": {} }]);
        }
        body
    }
}

/// Concatenate the text parts of the first candidate, skipping thought parts.
fn extract_text(event: &Value) -> Option<String> {
    let parts = event["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts
        .iter()
        .filter(|p| !p["thought"].as_bool().unwrap_or(false))
        .filter_map(|p| p["text"].as_str())
        .collect();
    Some(text)
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    async fn stream_recipe(
        &self,
        request: &RecipeRequest,
    ) -> Result<Box<dyn ChunkSource>, GenerateError> {
        let url = format!(
            "{}/v1beta/models/{}:streamGenerateContent?alt=sse",
            self.base_url, self.model
        );
        let body = self.request_body(request);
        debug!("Gemini request for model {}", self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;
        let response = check_status(response).await?;

        info!("Streaming recipe from Gemini ({})", self.model);
        Ok(Box::new(SseTextStream::new(response, extract_text)))
    }
}
