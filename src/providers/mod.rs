mod factory;
mod gemini;
mod open_ai;
mod prompt;
pub mod sse;

pub use factory::ProviderFactory;
pub use gemini::GeminiProvider;
pub use open_ai::OpenAIProvider;
pub use prompt::{build_recipe_prompt, CHEF_PERSONA_PROMPT};

use async_trait::async_trait;

use crate::request::RecipeRequest;
use crate::stream::ChunkSource;
use crate::GenerateError;

/// Unified trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "google", "openai")
    fn provider_name(&self) -> &str;

    /// Start generating a recipe; text arrives through the returned source.
    async fn stream_recipe(
        &self,
        request: &RecipeRequest,
    ) -> Result<Box<dyn ChunkSource>, GenerateError>;
}
