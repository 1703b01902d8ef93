pub mod builder;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod providers;
pub mod render;
pub mod request;
pub mod stream;

pub use builder::{Provider, RecipeGenerator, RecipeGeneratorBuilder};
pub use error::GenerateError;
pub use model::{GeneratedRecipe, Section, SectionKind};
pub use parser::{extract_title, normalize, parse_sections, UNTITLED_RECIPE};
pub use stream::{accumulate, ChunkSource, ReplaySource, Snapshot, StreamAccumulator};

/// Generate a recipe from a list of ingredients with the configured provider.
pub async fn generate_recipe(ingredients: &str) -> Result<GeneratedRecipe, GenerateError> {
    RecipeGenerator::builder()
        .ingredients(ingredients)
        .build()
        .await
}

/// Generate a recipe from a photo of ingredients with the configured provider.
pub async fn generate_recipe_from_image(
    path: impl AsRef<std::path::Path>,
) -> Result<GeneratedRecipe, GenerateError> {
    RecipeGenerator::builder().image(path).await?.build().await
}
