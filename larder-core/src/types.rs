use serde::{Deserialize, Serialize};
use std::fmt;

/// An ingredient from the bundled catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Ingredient {
    /// Identity key: the lower-cased name.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Category label for suggestions that came from the recipe API.
pub const CATEGORY_API_RESULT: &str = "API Result";
/// Category label for suggestions served from the bundled fallback list.
pub const CATEGORY_COMMON: &str = "Common Ingredient";
/// Category label for the default browse list.
pub const CATEGORY_POPULAR: &str = "Popular";

/// An ingredient offered to the user while typing or browsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientSuggestion {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl IngredientSuggestion {
    /// True when the suggestion was not served by the remote API.
    pub fn is_fallback(&self) -> bool {
        self.category.as_deref() != Some(CATEGORY_API_RESULT)
    }
}

/// A recipe, keyed by title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A recipe scored against a selection. Recomputed on every search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeMatch {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub match_count: usize,
    pub matched_ingredients: Vec<String>,
    pub match_percentage: u8,
}

impl RecipeMatch {
    pub fn title(&self) -> &str {
        &self.recipe.title
    }
}

/// Human-readable status surfaced next to results. Never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    InvalidCredential,
    QuotaExceeded,
    NoMatches,
    SelectionFull { max: usize },
    PersistenceWriteFailure,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::InvalidCredential => write!(f, "Invalid API key. Using basic search."),
            Advisory::QuotaExceeded => write!(f, "API quota exceeded. Using basic search."),
            Advisory::NoMatches => write!(f, "No recipes found with selected ingredients"),
            Advisory::SelectionFull { max } => write!(f, "Maximum {} ingredients allowed", max),
            Advisory::PersistenceWriteFailure => {
                write!(f, "Could not save changes; they will last for this session only")
            }
        }
    }
}
