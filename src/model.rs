use serde::Serialize;

/// The closed set of section types the parser can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Title,
    Description,
    Ingredients,
    Instructions,
    Nutrition,
    Health,
    Techniques,
    Substitutions,
    Pairing,
    Storage,
    Tips,
    Difficulty,
    Time,
    Text,
}

impl SectionKind {
    /// Whether sections of this kind collect list items.
    pub fn is_list_bearing(&self) -> bool {
        !matches!(
            self,
            SectionKind::Title | SectionKind::Description | SectionKind::Time | SectionKind::Text
        )
    }

    /// Heading shown by renderers when a section carries no heading of its own.
    pub fn default_heading(&self) -> &'static str {
        match self {
            SectionKind::Title => "Recipe",
            SectionKind::Description | SectionKind::Text => "",
            SectionKind::Ingredients => "Ingredients",
            SectionKind::Instructions => "Instructions",
            SectionKind::Nutrition => "Nutrition Facts",
            SectionKind::Health => "Health Benefits",
            SectionKind::Techniques => "Chef's Techniques",
            SectionKind::Substitutions => "Smart Substitutions",
            SectionKind::Pairing => "Perfect Pairings",
            SectionKind::Storage => "Storage & Meal Prep",
            SectionKind::Tips => "Chef's Final Notes",
            SectionKind::Difficulty => "Difficulty & Skill Level",
            SectionKind::Time => "Timing",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Title => "title",
            SectionKind::Description => "description",
            SectionKind::Ingredients => "ingredients",
            SectionKind::Instructions => "instructions",
            SectionKind::Nutrition => "nutrition",
            SectionKind::Health => "health",
            SectionKind::Techniques => "techniques",
            SectionKind::Substitutions => "substitutions",
            SectionKind::Pairing => "pairing",
            SectionKind::Storage => "storage",
            SectionKind::Tips => "tips",
            SectionKind::Difficulty => "difficulty",
            SectionKind::Time => "time",
            SectionKind::Text => "text",
        }
    }
}

/// One labeled chunk of parsed recipe text.
///
/// For `title`, `description`, `time` and `text` sections the line content
/// lives in `heading` and `items` stays empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub heading: String,
    pub items: Vec<String>,
}

impl Section {
    pub fn new(kind: SectionKind, heading: impl Into<String>) -> Self {
        Section {
            kind,
            heading: heading.into(),
            items: Vec::new(),
        }
    }

    /// The heading to display: the literal heading, or the kind's default.
    pub fn display_heading(&self) -> &str {
        if self.heading.is_empty() {
            self.kind.default_heading()
        } else {
            &self.heading
        }
    }
}

/// A finished generation: the only data handed to storage.
///
/// Sections are never stored; call [`GeneratedRecipe::sections`] to rebuild them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedRecipe {
    pub title: String,
    pub content: String,
    pub complete: bool,
}

impl GeneratedRecipe {
    pub fn from_text(content: impl Into<String>, complete: bool) -> Self {
        let content = content.into();
        GeneratedRecipe {
            title: crate::parser::extract_title(&content),
            content,
            complete,
        }
    }

    pub fn sections(&self) -> Vec<Section> {
        crate::parser::parse_sections(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_bearing_kinds() {
        assert!(SectionKind::Ingredients.is_list_bearing());
        assert!(SectionKind::Difficulty.is_list_bearing());
        assert!(!SectionKind::Title.is_list_bearing());
        assert!(!SectionKind::Time.is_list_bearing());
        assert!(!SectionKind::Text.is_list_bearing());
    }

    #[test]
    fn test_display_heading_falls_back_to_default() {
        let tips = Section::new(SectionKind::Tips, "");
        assert_eq!(tips.display_heading(), "Chef's Final Notes");

        let ingredients = Section::new(SectionKind::Ingredients, "What You Need");
        assert_eq!(ingredients.display_heading(), "What You Need");
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let section = Section::new(SectionKind::Substitutions, "Swaps");
        let json = serde_json::to_string(&section).unwrap();
        assert!(json.contains("\"kind\":\"substitutions\""));
    }

    #[test]
    fn test_generated_recipe_derives_title() {
        let recipe = GeneratedRecipe::from_text("Lemon Tart\n\nIngredients\n- lemons", true);
        assert_eq!(recipe.title, "Lemon Tart");
        assert_eq!(recipe.sections().len(), 2);
    }
}
