use crate::GenerateError;

/// An image of ingredients to identify before writing the recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ImageInput {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        ImageInput {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Guess the MIME type from a file extension, defaulting to JPEG.
    pub fn mime_type_for(path: &std::path::Path) -> &'static str {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            Some("gif") => "image/gif",
            Some("heic") => "image/heic",
            _ => "image/jpeg",
        }
    }
}

/// What the recipe should be built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeInput {
    /// Free-form list of available ingredients
    Text(String),
    /// Photo of the available ingredients
    Image(ImageInput),
}

/// Everything the user told us about the meal they want.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeRequest {
    pub input: RecipeInput,
    /// Upper bound in minutes
    pub max_cooking_time: u32,
    pub cooking_experience: String,
    pub health_conditions: Vec<String>,
    pub dietary_restrictions: Vec<String>,
    pub weather: String,
    pub meal_type: String,
    pub servings: u32,
    pub equipment: Vec<String>,
}

impl RecipeRequest {
    pub fn from_ingredients(ingredients: impl Into<String>) -> Self {
        Self::with_input(RecipeInput::Text(ingredients.into()))
    }

    pub fn from_image(image: ImageInput) -> Self {
        Self::with_input(RecipeInput::Image(image))
    }

    fn with_input(input: RecipeInput) -> Self {
        RecipeRequest {
            input,
            max_cooking_time: 30,
            cooking_experience: String::new(),
            health_conditions: Vec::new(),
            dietary_restrictions: Vec::new(),
            weather: String::new(),
            meal_type: String::new(),
            servings: 2,
            equipment: Vec::new(),
        }
    }

    /// Reject requests the provider cannot do anything useful with.
    pub fn validate(&self) -> Result<(), GenerateError> {
        match &self.input {
            RecipeInput::Text(ingredients) if ingredients.trim().is_empty() => Err(
                GenerateError::InvalidRequest("Please enter some ingredients".to_string()),
            ),
            RecipeInput::Image(image) if image.data.is_empty() => Err(
                GenerateError::InvalidRequest(
                    "Please upload an image of your ingredients".to_string(),
                ),
            ),
            _ if self.servings == 0 => Err(GenerateError::InvalidRequest(
                "Servings must be at least 1".to_string(),
            )),
            _ => Ok(()),
        }
    }

    pub fn image(&self) -> Option<&ImageInput> {
        match &self.input {
            RecipeInput::Image(image) => Some(image),
            RecipeInput::Text(_) => None,
        }
    }
}
