use std::path::Path;
use std::time::Duration;

use log::{info, warn};

use crate::config::{AppConfig, ProviderConfig};
use crate::providers::{LlmProvider, ProviderFactory};
use crate::request::{ImageInput, RecipeInput, RecipeRequest};
use crate::stream::{accumulate, Snapshot};
use crate::{GenerateError, GeneratedRecipe};

/// LLM provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Google,
    OpenAI,
}

impl Provider {
    /// Convert to provider name string used by the factory
    fn as_str(&self) -> &str {
        match self {
            Provider::Google => "google",
            Provider::OpenAI => "openai",
        }
    }
}

/// Builder for configuring and running a recipe generation
#[derive(Debug, Default)]
pub struct RecipeGeneratorBuilder {
    input: Option<RecipeInput>,
    max_cooking_time: Option<u32>,
    cooking_experience: Option<String>,
    health_conditions: Vec<String>,
    dietary_restrictions: Vec<String>,
    weather: Option<String>,
    meal_type: Option<String>,
    servings: Option<u32>,
    equipment: Vec<String>,
    provider: Option<Provider>,
    timeout: Option<Duration>,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
}

impl RecipeGeneratorBuilder {
    /// Build the recipe from a list of available ingredients
    ///
    /// # Example
    /// ```
    /// use recipe_stream::RecipeGenerator;
    ///
    /// let builder = RecipeGenerator::builder()
    ///     .ingredients("chicken breast, broccoli, garlic, rice");
    /// ```
    pub fn ingredients(mut self, ingredients: impl Into<String>) -> Self {
        self.input = Some(RecipeInput::Text(ingredients.into()));
        self
    }

    /// Build the recipe from a photo of the ingredients
    pub fn image_bytes(mut self, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        self.input = Some(RecipeInput::Image(ImageInput::new(mime_type, data)));
        self
    }

    /// Build the recipe from a photo on disk
    ///
    /// The MIME type is guessed from the file extension.
    pub async fn image(self, path: impl AsRef<Path>) -> Result<Self, GenerateError> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        Ok(self.image_bytes(ImageInput::mime_type_for(path), data))
    }

    /// Maximum total cooking time in minutes
    pub fn max_cooking_time(mut self, minutes: u32) -> Self {
        self.max_cooking_time = Some(minutes);
        self
    }

    /// Cook's experience, e.g. "beginner" or "advanced"
    pub fn cooking_experience(mut self, level: impl Into<String>) -> Self {
        self.cooking_experience = Some(level.into());
        self
    }

    pub fn health_condition(mut self, condition: impl Into<String>) -> Self {
        self.health_conditions.push(condition.into());
        self
    }

    pub fn health_conditions<I, S>(mut self, conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.health_conditions
            .extend(conditions.into_iter().map(Into::into));
        self
    }

    pub fn dietary_restriction(mut self, restriction: impl Into<String>) -> Self {
        self.dietary_restrictions.push(restriction.into());
        self
    }

    pub fn dietary_restrictions<I, S>(mut self, restrictions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dietary_restrictions
            .extend(restrictions.into_iter().map(Into::into));
        self
    }

    /// Weather or mood, e.g. "cold" or "tired"
    pub fn weather(mut self, weather: impl Into<String>) -> Self {
        self.weather = Some(weather.into());
        self
    }

    /// Meal type, e.g. "dinner"
    pub fn meal_type(mut self, meal_type: impl Into<String>) -> Self {
        self.meal_type = Some(meal_type.into());
        self
    }

    pub fn servings(mut self, servings: u32) -> Self {
        self.servings = Some(servings);
        self
    }

    /// Available cooking equipment
    pub fn equipment<I, S>(mut self, equipment: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.equipment.extend(equipment.into_iter().map(Into::into));
        self
    }

    /// Set a custom LLM provider
    ///
    /// # Example
    /// ```
    /// use recipe_stream::{Provider, RecipeGenerator};
    ///
    /// let builder = RecipeGenerator::builder()
    ///     .ingredients("eggs, spinach")
    ///     .provider(Provider::OpenAI);
    /// ```
    pub fn provider(mut self, provider: Provider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set a timeout for the whole streamed request
    ///
    /// Without an explicit API key, model or base URL the timeout is applied
    /// to the loaded configuration, in whole seconds.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the API key for the LLM provider
    ///
    /// This allows passing the API key directly instead of relying on
    /// environment variables or config files.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the LLM provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[doc(hidden)]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Run the generation and return the finished recipe
    ///
    /// # Errors
    /// Returns `GenerateError` if:
    /// - No ingredients or image were given
    /// - The provider cannot be configured
    /// - The request or stream fails before any text arrives
    /// - The stream breaks off midway (`StreamInterrupted`, with the partial text)
    pub async fn build(self) -> Result<GeneratedRecipe, GenerateError> {
        self.build_with(|_| {}).await
    }

    /// Like [`build`](Self::build), calling `on_update` with the full text
    /// after every streamed chunk and once more on completion.
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_stream::RecipeGenerator;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let recipe = RecipeGenerator::builder()
    ///     .ingredients("salmon, lemon, dill")
    ///     .build_with(|snapshot| {
    ///         println!("{} sections so far", snapshot.sections().len());
    ///     })
    ///     .await?;
    /// println!("{}", recipe.title);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build_with<F>(self, on_update: F) -> Result<GeneratedRecipe, GenerateError>
    where
        F: FnMut(&Snapshot),
    {
        let (request, provider) = self.prepare()?;

        let mut source = provider.stream_recipe(&request).await?;
        let outcome = accumulate(source.as_mut(), on_update).await;

        match outcome.error {
            None => {
                let recipe = GeneratedRecipe::from_text(outcome.snapshot.text, true);
                info!("Generated \"{}\" with {}", recipe.title, provider.provider_name());
                Ok(recipe)
            }
            Some(e) if outcome.snapshot.text.is_empty() => Err(e),
            Some(e) => {
                warn!(
                    "Generation with {} stopped early: {}",
                    provider.provider_name(),
                    e
                );
                Err(GenerateError::StreamInterrupted {
                    partial: outcome.snapshot.text,
                    message: e.to_string(),
                })
            }
        }
    }

    fn prepare(self) -> Result<(RecipeRequest, Box<dyn LlmProvider>), GenerateError> {
        let input = self.input.ok_or_else(|| {
            GenerateError::BuilderError(
                "No input specified. Use .ingredients() or .image()".to_string(),
            )
        })?;

        let mut request = match input {
            RecipeInput::Text(text) => RecipeRequest::from_ingredients(text),
            RecipeInput::Image(image) => RecipeRequest::from_image(image),
        };
        if let Some(minutes) = self.max_cooking_time {
            request.max_cooking_time = minutes;
        }
        if let Some(servings) = self.servings {
            request.servings = servings;
        }
        request.cooking_experience = self.cooking_experience.unwrap_or_default();
        request.weather = self.weather.unwrap_or_default();
        request.meal_type = self.meal_type.unwrap_or_default();
        request.health_conditions = self.health_conditions;
        request.dietary_restrictions = self.dietary_restrictions;
        request.equipment = self.equipment;
        request.validate()?;

        let has_overrides = self.api_key.is_some() || self.model.is_some() || self.base_url.is_some();
        if !has_overrides {
            let mut app_config = AppConfig::load()?;
            if let Some(timeout) = self.timeout {
                app_config.timeout = timeout.as_secs().max(1);
            }
            let provider = match self.provider {
                Some(provider) => ProviderFactory::from_config(provider.as_str(), &app_config)?,
                None => ProviderFactory::get_default_provider(&app_config)?,
            };
            return Ok((request, provider));
        }

        let app_config = AppConfig::default();
        let provider_name = self
            .provider
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| app_config.default_provider.clone());
        let mut provider_config: ProviderConfig =
            app_config.provider(&provider_name).ok_or_else(|| {
                GenerateError::BuilderError(format!("Unknown provider: {}", provider_name))
            })?;

        if let Some(key) = self.api_key {
            provider_config.api_key = Some(key);
        }
        if let Some(model) = self.model {
            provider_config.model = model;
        }
        if let Some(base_url) = self.base_url {
            provider_config.base_url = Some(base_url);
        }
        let timeout = self.timeout.unwrap_or_else(|| app_config.timeout());

        let provider = ProviderFactory::create(&provider_name, &provider_config, timeout)?;
        Ok((request, provider))
    }
}

/// Main entry point for the builder API
pub struct RecipeGenerator;

impl RecipeGenerator {
    /// Creates a new builder for generating recipes
    ///
    /// # Example
    /// ```
    /// use recipe_stream::RecipeGenerator;
    ///
    /// let builder = RecipeGenerator::builder();
    /// ```
    pub fn builder() -> RecipeGeneratorBuilder {
        RecipeGeneratorBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_without_input() {
        let result = RecipeGenerator::builder().api_key("k").prepare();
        match result {
            Err(GenerateError::BuilderError(message)) => {
                assert!(message.contains("No input specified"))
            }
            _ => panic!("expected a builder error"),
        }
    }

    #[test]
    fn test_prepare_copies_preferences() {
        let (request, provider) = RecipeGenerator::builder()
            .ingredients("tofu, bok choy")
            .max_cooking_time(45)
            .servings(3)
            .cooking_experience("intermediate")
            .health_conditions(["Hypertension"])
            .dietary_restriction("Vegan")
            .equipment(["Wok", "Stovetop"])
            .meal_type("dinner")
            .weather("rainy")
            .provider(Provider::OpenAI)
            .api_key("test-key")
            .prepare()
            .unwrap();

        assert_eq!(provider.provider_name(), "openai");
        assert_eq!(request.max_cooking_time, 45);
        assert_eq!(request.servings, 3);
        assert_eq!(request.cooking_experience, "intermediate");
        assert_eq!(request.health_conditions, vec!["Hypertension"]);
        assert_eq!(request.dietary_restrictions, vec!["Vegan"]);
        assert_eq!(request.equipment, vec!["Wok", "Stovetop"]);
        assert_eq!(request.meal_type, "dinner");
        assert_eq!(request.weather, "rainy");
    }

    #[test]
    fn test_prepare_rejects_blank_ingredients() {
        let result = RecipeGenerator::builder()
            .ingredients("  ")
            .api_key("test-key")
            .prepare();
        assert!(matches!(result, Err(GenerateError::InvalidRequest(_))));
    }

    #[test]
    fn test_overrides_default_to_google() {
        let (_, provider) = RecipeGenerator::builder()
            .ingredients("eggs")
            .api_key("test-key")
            .prepare()
            .unwrap();
        assert_eq!(provider.provider_name(), "google");
    }

    #[test]
    fn test_prepare_uses_configured_provider_without_overrides() {
        std::env::set_var("OPENAI_API_KEY", "test-key");
        let (_, provider) = RecipeGenerator::builder()
            .ingredients("eggs")
            .provider(Provider::OpenAI)
            .timeout(Duration::from_secs(5))
            .prepare()
            .unwrap();
        assert_eq!(provider.provider_name(), "openai");
    }

    #[tokio::test]
    async fn test_image_from_missing_file() {
        let result = RecipeGenerator::builder()
            .image("/definitely/not/here.jpg")
            .await;
        assert!(matches!(result, Err(GenerateError::IoError(_))));
    }
}
