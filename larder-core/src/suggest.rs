//! Ingredient suggestions while typing, with catalog fallback.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::catalog;
use crate::error::SourceError;
use crate::http::HttpClient;
use crate::spoonacular::SpoonacularClient;
use crate::types::{Advisory, IngredientSuggestion};

/// Suggestions for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionOutcome {
    pub suggestions: Vec<IngredientSuggestion>,
    pub advisory: Option<Advisory>,
    /// True when served from the catalog instead of the API.
    pub degraded: bool,
}

/// Suggests ingredients from the API, falling back to the catalog.
///
/// After the first API failure the suggester stops calling the API until
/// [`retry_remote`](Self::retry_remote) is called.
pub struct IngredientSuggester<C: HttpClient> {
    client: Arc<SpoonacularClient<C>>,
    api_available: AtomicBool,
    advisory: Mutex<Option<Advisory>>,
}

impl<C: HttpClient> IngredientSuggester<C> {
    pub fn new(client: Arc<SpoonacularClient<C>>) -> Self {
        Self {
            client,
            api_available: AtomicBool::new(true),
            advisory: Mutex::new(None),
        }
    }

    pub fn is_api_available(&self) -> bool {
        self.api_available.load(Ordering::SeqCst)
    }

    fn set_advisory(&self, advisory: Option<Advisory>) {
        if let Ok(mut slot) = self.advisory.lock() {
            *slot = advisory;
        }
    }

    fn current_advisory(&self) -> Option<Advisory> {
        self.advisory.lock().ok().and_then(|slot| *slot)
    }

    fn fallback(&self, query: &str) -> SuggestionOutcome {
        SuggestionOutcome {
            suggestions: catalog::search_fallback(query),
            advisory: self.current_advisory(),
            degraded: true,
        }
    }

    /// Suggestions for a typed query. A blank query yields nothing.
    pub async fn suggest(&self, query: &str) -> SuggestionOutcome {
        if query.trim().is_empty() {
            return SuggestionOutcome::default();
        }

        if !self.is_api_available() {
            return self.fallback(query);
        }

        match self.client.search_ingredients(query, catalog::SEARCH_LIMIT).await {
            Ok(results) if !results.is_empty() => SuggestionOutcome {
                suggestions: results.into_iter().map(|r| r.into_suggestion()).collect(),
                advisory: None,
                degraded: false,
            },
            Ok(_) => {
                tracing::debug!(query, "no API suggestions, using catalog");
                self.fallback(query)
            }
            Err(e) => {
                self.api_available.store(false, Ordering::SeqCst);
                match e {
                    SourceError::InvalidCredential => {
                        self.set_advisory(Some(Advisory::InvalidCredential))
                    }
                    SourceError::QuotaExceeded => self.set_advisory(Some(Advisory::QuotaExceeded)),
                    SourceError::NotConfigured => {}
                    other => tracing::warn!(error = %other, "ingredient search failed"),
                }
                self.fallback(query)
            }
        }
    }

    /// The default browse list.
    pub async fn popular(&self, limit: usize) -> Vec<IngredientSuggestion> {
        if self.is_api_available() {
            let remote = self.client.popular_ingredients(limit).await;
            if !remote.is_empty() {
                return remote.into_iter().map(|r| r.into_suggestion()).collect();
            }
        }
        catalog::popular(limit)
    }

    /// Re-enable the API after a failure and clear any advisory.
    pub fn retry_remote(&self) {
        self.api_available.store(true, Ordering::SeqCst);
        self.set_advisory(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockClient;
    use crate::types::{CATEGORY_API_RESULT, CATEGORY_COMMON, CATEGORY_POPULAR};

    fn suggester(mock: MockClient, key: Option<&str>) -> (Arc<MockClient>, IngredientSuggester<MockClient>) {
        let http = Arc::new(mock);
        let client = SpoonacularClient::new(http.clone(), "https://api.example.com", key.map(String::from));
        (http, IngredientSuggester::new(Arc::new(client)))
    }

    #[tokio::test]
    async fn test_api_results_are_tagged() {
        let (_, s) = suggester(
            MockClient::new().with_json("query=garl", r#"{"results":[{"id":11215,"name":"garlic"}]}"#),
            Some("k"),
        );
        let outcome = s.suggest("garl").await;
        assert!(!outcome.degraded);
        assert_eq!(outcome.suggestions[0].name, "garlic");
        assert_eq!(outcome.suggestions[0].id, "11215");
        assert_eq!(outcome.suggestions[0].category.as_deref(), Some(CATEGORY_API_RESULT));
    }

    #[tokio::test]
    async fn test_unconfigured_uses_catalog_silently() {
        let (http, s) = suggester(MockClient::new(), None);
        let outcome = s.suggest("garl").await;
        assert!(outcome.degraded);
        assert!(outcome.advisory.is_none());
        assert_eq!(outcome.suggestions[0].name, "Garlic");
        assert_eq!(outcome.suggestions[0].category.as_deref(), Some(CATEGORY_COMMON));
        assert!(http.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_failure_latches_until_retry() {
        let (http, s) = suggester(MockClient::new().with_status("query=", 401), Some("bad"));

        let outcome = s.suggest("rice").await;
        assert_eq!(outcome.advisory, Some(Advisory::InvalidCredential));
        assert_eq!(outcome.suggestions[0].name, "Rice");
        assert!(!s.is_api_available());

        s.suggest("corn").await;
        assert_eq!(http.requests().await.len(), 1);

        s.retry_remote();
        assert!(s.is_api_available());
        s.suggest("corn").await;
        assert_eq!(http.requests().await.len(), 2);
    }

    #[tokio::test]
    async fn test_blank_query() {
        let (http, s) = suggester(MockClient::new(), Some("k"));
        assert_eq!(s.suggest(" ").await, SuggestionOutcome::default());
        assert!(http.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_popular_falls_back_to_catalog() {
        let (_, s) = suggester(MockClient::new(), None);
        let popular = s.popular(4).await;
        assert_eq!(popular.len(), 4);
        assert!(popular.iter().all(|p| p.category.as_deref() == Some(CATEGORY_POPULAR)));
    }
}
