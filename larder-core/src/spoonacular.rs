//! Client for the Spoonacular ingredient and recipe search endpoints.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::SourceError;
use crate::http::{redact_api_key, HttpClient, API_KEY_PARAM};
use crate::types::{IngredientSuggestion, Recipe, CATEGORY_API_RESULT};

/// Staple ingredients looked up to build the API's popular list.
const POPULAR_INGREDIENTS: &[&str] = &[
    "chicken",
    "beef",
    "pork",
    "salmon",
    "shrimp",
    "tomato",
    "onion",
    "garlic",
    "bell pepper",
    "carrot",
    "potato",
    "broccoli",
    "spinach",
    "mushroom",
    "corn",
    "rice",
    "pasta",
    "cheese",
    "egg",
    "milk",
];

/// An ingredient returned by `/food/ingredients/search`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteIngredient {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl RemoteIngredient {
    pub fn into_suggestion(self) -> IngredientSuggestion {
        IngredientSuggestion {
            id: self.id.to_string(),
            name: self.name,
            category: Some(CATEGORY_API_RESULT.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IngredientSearchResponse {
    #[serde(default)]
    results: Vec<RemoteIngredient>,
    #[serde(default)]
    #[allow(dead_code)]
    total_results: u64,
}

/// An ingredient entry inside a `/recipes/findByIngredients` result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteRecipeIngredient {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub original: Option<String>,
}

/// A recipe returned by `/recipes/findByIngredients`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRecipe {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub used_ingredients: Vec<RemoteRecipeIngredient>,
    #[serde(default)]
    pub missed_ingredients: Vec<RemoteRecipeIngredient>,
    #[serde(default)]
    pub used_ingredient_count: u32,
    #[serde(default)]
    pub missed_ingredient_count: u32,
    #[serde(default)]
    pub likes: u32,
}

impl RemoteRecipe {
    /// Flatten into a [`Recipe`].
    ///
    /// Used and missed ingredients are merged into a single list, used
    /// first, lower-cased and de-duplicated. The scorer decides for itself
    /// what the selection covers.
    pub fn into_recipe(self) -> Recipe {
        let mut seen = HashSet::new();
        let ingredients: Vec<String> = self
            .used_ingredients
            .into_iter()
            .chain(self.missed_ingredients)
            .map(|ing| ing.name.trim().to_lowercase())
            .filter(|name| !name.is_empty() && seen.insert(name.clone()))
            .collect();

        Recipe {
            title: self.title,
            description: format!(
                "A delicious recipe using {} of your selected ingredients.",
                self.used_ingredient_count
            ),
            ingredients,
            image: self.image,
        }
    }
}

/// Spoonacular API client.
///
/// Every call fails fast with [`SourceError::NotConfigured`] when no API key
/// is present, before any request is made.
pub struct SpoonacularClient<C: HttpClient> {
    http: Arc<C>,
    base_url: String,
    api_key: Option<String>,
}

impl<C: HttpClient> SpoonacularClient<C> {
    pub fn new(http: Arc<C>, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<String, SourceError> {
        let api_key = self.api_key.as_deref().ok_or(SourceError::NotConfigured)?;

        let mut url = url::Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| SourceError::Unreachable(format!("invalid base URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair(API_KEY_PARAM, api_key)
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        Ok(url.into())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        let response = self.http.get(url).await.map_err(|e| {
            tracing::warn!(url = %redact_api_key(url), error = %e, "recipe API request failed");
            SourceError::from(e)
        })?;

        match response.status {
            401 => return Err(SourceError::InvalidCredential),
            402 => return Err(SourceError::QuotaExceeded),
            status if !response.is_success() => return Err(SourceError::Upstream { status }),
            _ => {}
        }

        serde_json::from_str(&response.body).map_err(|e| SourceError::InvalidResponse(e.to_string()))
    }

    /// Search ingredient names. A blank query returns nothing.
    pub async fn search_ingredients(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RemoteIngredient>, SourceError> {
        let url = self.endpoint(
            "/food/ingredients/search",
            &[("query", query.trim().to_string()), ("number", limit.to_string())],
        )?;
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let response: IngredientSearchResponse = self.get_json(&url).await?;
        Ok(response.results)
    }

    /// Find recipes using the given ingredients, ranked to minimise missing
    /// ingredients and ignoring pantry staples.
    pub async fn search_recipes_by_ingredients(
        &self,
        ingredients: &[String],
        limit: usize,
    ) -> Result<Vec<RemoteRecipe>, SourceError> {
        let url = self.endpoint(
            "/recipes/findByIngredients",
            &[
                ("ingredients", ingredients.join(",")),
                ("number", limit.to_string()),
                ("ranking", "2".to_string()),
                ("ignorePantry", "true".to_string()),
            ],
        )?;
        if ingredients.is_empty() {
            return Ok(Vec::new());
        }

        self.get_json(&url).await
    }

    /// Look up the first API match for each staple ingredient.
    ///
    /// Any failure yields an empty list; callers fall back to the catalog.
    pub async fn popular_ingredients(&self, limit: usize) -> Vec<RemoteIngredient> {
        if !self.is_configured() {
            return Vec::new();
        }

        let mut found = Vec::new();
        for name in POPULAR_INGREDIENTS.iter().take(limit) {
            match self.search_ingredients(name, 1).await {
                Ok(mut results) => {
                    if !results.is_empty() {
                        found.push(results.swap_remove(0));
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "popular ingredient lookup failed");
                    return Vec::new();
                }
            }
        }
        found
    }
}
