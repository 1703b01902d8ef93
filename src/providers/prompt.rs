use crate::request::{RecipeInput, RecipeRequest};

/// System instruction giving the model its celebrity-chef persona.
///
/// It also pins down the heading vocabulary the section parser recognises,
/// so generated recipes segment cleanly. Loaded from `persona.txt` at compile
/// time using the `include_str!` macro.
pub const CHEF_PERSONA_PROMPT: &str = include_str!("persona.txt");

/// Render the user prompt for a recipe request.
pub fn build_recipe_prompt(request: &RecipeRequest) -> String {
    let opening = match &request.input {
        RecipeInput::Text(ingredients) => format!(
            "Create a personalized recipe using these ingredients: {}",
            ingredients.trim()
        ),
        RecipeInput::Image(_) => "Analyze this image to identify the ingredients, then create a personalized recipe with the following requirements:".to_string(),
    };

    format!(
        "{opening}

COOKING CONTEXT:
- Maximum cooking time: {time} minutes
- Cooking experience: {experience}
- Number of servings: {servings}
- Meal type: {meal}
- Weather/mood: {weather}

HEALTH & DIETARY:
- Health conditions: {health}
- Dietary restrictions: {dietary}

AVAILABLE EQUIPMENT:
- {equipment}

Please provide:
1. A creative recipe title
2. Brief description (2-3 sentences)
3. Complete ingredient list with exact quantities
4. Step-by-step cooking instructions (numbered)
5. Cooking tips and techniques
6. Estimated prep and cook time
7. Nutritional highlights
8. Serving suggestions

Use web search to find the latest cooking techniques, seasonal variations, and ensure the recipe is optimized for the specified health conditions and dietary restrictions. Make it engaging, practical, and personalized for the user's experience level!",
        time = request.max_cooking_time,
        experience = or_unspecified(&request.cooking_experience),
        servings = request.servings,
        meal = or_unspecified(&request.meal_type),
        weather = or_unspecified(&request.weather),
        health = join_or(&request.health_conditions, "None specified"),
        dietary = join_or(&request.dietary_restrictions, "None specified"),
        equipment = join_or(&request.equipment, "Standard kitchen equipment"),
    )
}

fn or_unspecified(value: &str) -> &str {
    match value.trim() {
        "" => "Not specified",
        trimmed => trimmed,
    }
}

fn join_or(values: &[String], fallback: &str) -> String {
    let kept: Vec<&str> = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();
    if kept.is_empty() {
        fallback.to_string()
    } else {
        kept.join(", ")
    }
}
