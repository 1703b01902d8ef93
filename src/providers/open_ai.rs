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

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider from configuration
    pub fn new(config: &ProviderConfig, timeout: Duration) -> Result<Self, GenerateError> {
        // Try config first, then fall back to environment variable
        let api_key = match config.api_key.clone() {
            Some(key) => key,
            None => std::env::var("OPENAI_API_KEY")?,
        };

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(OpenAIProvider {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    fn request_body(&self, request: &RecipeRequest) -> Value {
        let prompt = build_recipe_prompt(request);
        let user_content = match request.image() {
            Some(image) => json!([
                { "type": "text", "text": prompt },
                {
                    "type": "image_url",
                    "image_url": {
                        "url": format!("data:{};base64,{}", image.mime_type, STANDARD.encode(&image.data))
                    }
                }
            ]),
            None => json!(prompt),
        };

        json!({
            "model": self.model,
            "stream": true,
            "messages": [
                { "role": "system", "content": CHEF_PERSONA_PROMPT },
                { "role": "user", "content": user_content }
            ],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens
        })
    }
}

fn extract_text(event: &Value) -> Option<String> {
    event["choices"][0]["delta"]["content"]
        .as_str()
        .map(String::from)
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn stream_recipe(
        &self,
        request: &RecipeRequest,
    ) -> Result<Box<dyn ChunkSource>, GenerateError> {
        debug!("OpenAI request for model {}", self.model);
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&self.request_body(request))
            .send()
            .await?;
        let response = check_status(response).await?;

        info!("Streaming recipe from OpenAI ({})", self.model);
        Ok(Box::new(SseTextStream::new(response, extract_text)))
    }
}
