//! Candidate recipe sources for the finder.

use async_trait::async_trait;
use std::sync::Arc;

use crate::catalog;
use crate::error::SourceError;
use crate::http::HttpClient;
use crate::matching::ScoringPolicy;
use crate::spoonacular::SpoonacularClient;
use crate::types::Recipe;

/// Something that can supply candidate recipes for a selection.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Short name for logs and search outcomes (e.g., "spoonacular", "catalog").
    fn name(&self) -> &'static str;

    /// How candidates from this source are scored.
    fn policy(&self) -> ScoringPolicy;

    /// Whether this source performs network I/O.
    fn is_remote(&self) -> bool;

    /// Candidate recipes for the selection. `limit` is a hint; sources may
    /// return more and leave the cap to the ranker.
    async fn candidates(&self, selected: &[String], limit: usize)
        -> Result<Vec<Recipe>, SourceError>;
}

/// The bundled recipe table. Never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticCatalogSource;

#[async_trait]
impl RecipeSource for StaticCatalogSource {
    fn name(&self) -> &'static str {
        "catalog"
    }

    fn policy(&self) -> ScoringPolicy {
        ScoringPolicy::STATIC
    }

    fn is_remote(&self) -> bool {
        false
    }

    async fn candidates(
        &self,
        _selected: &[String],
        _limit: usize,
    ) -> Result<Vec<Recipe>, SourceError> {
        Ok(catalog::recipes().to_vec())
    }
}

/// Recipes from the Spoonacular API, normalized to [`Recipe`].
pub struct RemoteRecipeSource<C: HttpClient> {
    client: Arc<SpoonacularClient<C>>,
}

impl<C: HttpClient> RemoteRecipeSource<C> {
    pub fn new(client: Arc<SpoonacularClient<C>>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: HttpClient + 'static> RecipeSource for RemoteRecipeSource<C> {
    fn name(&self) -> &'static str {
        "spoonacular"
    }

    fn policy(&self) -> ScoringPolicy {
        ScoringPolicy::REMOTE
    }

    fn is_remote(&self) -> bool {
        true
    }

    async fn candidates(
        &self,
        selected: &[String],
        limit: usize,
    ) -> Result<Vec<Recipe>, SourceError> {
        let remote = self
            .client
            .search_recipes_by_ingredients(selected, limit)
            .await?;
        Ok(remote.into_iter().map(|r| r.into_recipe()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockClient;

    #[tokio::test]
    async fn test_static_source_returns_catalog() {
        let source = StaticCatalogSource;
        let recipes = source.candidates(&["Egg".to_string()], 3).await.unwrap();
        assert_eq!(recipes.len(), catalog::recipes().len());
        assert!(!source.is_remote());
        assert_eq!(source.policy(), ScoringPolicy::STATIC);
    }

    #[tokio::test]
    async fn test_remote_source_normalizes() {
        let mock = MockClient::new().with_json(
            "/recipes/findByIngredients",
            r#"[{"id":7,"title":"Egg Fried Rice","usedIngredients":[{"name":"Eggs"}],"missedIngredients":[{"name":"Rice"}],"usedIngredientCount":1}]"#,
        );
        let client = SpoonacularClient::new(Arc::new(mock), "https://api.example.com", Some("k".to_string()));
        let source = RemoteRecipeSource::new(Arc::new(client));

        let recipes = source.candidates(&["egg".to_string()], 5).await.unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].ingredients, vec!["eggs", "rice"]);
        assert_eq!(source.policy(), ScoringPolicy::REMOTE);
    }
}
