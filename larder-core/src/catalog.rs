//! Bundled ingredient and recipe reference data.
//!
//! Used as the default browse list and as the search corpus whenever the
//! recipe API is unavailable. Loaded from `data/catalog.json` at compile time.

use serde::Deserialize;
use std::sync::LazyLock;

use crate::types::{Ingredient, IngredientSuggestion, Recipe, CATEGORY_COMMON, CATEGORY_POPULAR};

/// Maximum number of suggestions returned for a typed query.
pub const SEARCH_LIMIT: usize = 8;

/// Number of catalog entries shown when browsing without a query.
pub const BROWSE_DEFAULT: usize = 10;

/// The raw JSON structure for the catalog data file.
#[derive(Deserialize)]
struct CatalogData {
    ingredients: Vec<Ingredient>,
    popular: Vec<String>,
    recipes: Vec<Recipe>,
}

static CATALOG: LazyLock<CatalogData> = LazyLock::new(|| {
    let json = include_str!("../data/catalog.json");
    serde_json::from_str(json).expect("Failed to parse catalog.json")
});

/// The expanded ingredient catalog, with categories.
pub fn ingredients() -> &'static [Ingredient] {
    &CATALOG.ingredients
}

/// The common ingredient names used as the offline suggestion corpus.
pub fn popular_names() -> &'static [String] {
    &CATALOG.popular
}

/// The static recipe table.
pub fn recipes() -> &'static [Recipe] {
    &CATALOG.recipes
}

/// Search the common ingredient list by case-insensitive substring.
///
/// Results are tagged "Common Ingredient" so callers can tell the user
/// they are seeing the offline list.
pub fn search_fallback(query: &str) -> Vec<IngredientSuggestion> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    popular_names()
        .iter()
        .filter(|name| name.to_lowercase().contains(&query))
        .take(SEARCH_LIMIT)
        .enumerate()
        .map(|(index, name)| IngredientSuggestion {
            id: format!("fallback-{}-{}", index, name),
            name: name.clone(),
            category: Some(CATEGORY_COMMON.to_string()),
        })
        .collect()
}

/// Browse the expanded catalog. Matches on name or category.
pub fn browse(query: &str) -> Vec<IngredientSuggestion> {
    let query = query.trim().to_lowercase();

    let to_suggestion = |(index, ingredient): (usize, &Ingredient)| IngredientSuggestion {
        id: (index + 1).to_string(),
        name: ingredient.name.clone(),
        category: ingredient.category.clone(),
    };

    if query.is_empty() {
        return ingredients()
            .iter()
            .enumerate()
            .take(BROWSE_DEFAULT)
            .map(to_suggestion)
            .collect();
    }

    ingredients()
        .iter()
        .enumerate()
        .filter(|(_, ingredient)| {
            ingredient.name.to_lowercase().contains(&query)
                || ingredient
                    .category
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase().contains(&query))
        })
        .take(SEARCH_LIMIT)
        .map(to_suggestion)
        .collect()
}

/// The first `limit` common ingredients, tagged "Popular".
pub fn popular(limit: usize) -> Vec<IngredientSuggestion> {
    popular_names()
        .iter()
        .take(limit)
        .enumerate()
        .map(|(index, name)| IngredientSuggestion {
            id: format!("popular-{}", index),
            name: name.clone(),
            category: Some(CATEGORY_POPULAR.to_string()),
        })
        .collect()
}
