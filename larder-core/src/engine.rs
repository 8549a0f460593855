//! Recipe finder: walks a chain of candidate sources and ranks the first
//! useful answer.
//!
//! The usual chain is the recipe API followed by the bundled catalog. A source
//! that errors, is unconfigured, or produces no matches hands over to the next
//! one. Failures never reach the caller; credential and quota problems are
//! reported as an [`Advisory`] because someone can act on them.

use serde::Serialize;
use std::sync::Arc;

use crate::config::LarderConfig;
use crate::error::SourceError;
use crate::http::HttpClient;
use crate::matching;
use crate::source::{RecipeSource, RemoteRecipeSource, StaticCatalogSource};
use crate::spoonacular::SpoonacularClient;
use crate::types::{Advisory, RecipeMatch};

/// Result of a search, ready for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub matches: Vec<RecipeMatch>,
    /// Status line to show next to the results, if any.
    pub advisory: Option<Advisory>,
    /// Name of the source that produced `matches`.
    pub source: Option<&'static str>,
    /// True when a remote source in the chain failed.
    pub degraded: bool,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Ranks recipes for a selection of ingredients.
pub struct RecipeFinder {
    sources: Vec<Arc<dyn RecipeSource>>,
    max_results: usize,
    candidate_limit: usize,
}

impl RecipeFinder {
    /// Create a finder over an ordered source chain.
    pub fn new(sources: Vec<Arc<dyn RecipeSource>>, max_results: usize) -> Self {
        Self {
            sources,
            max_results,
            candidate_limit: crate::config::DEFAULT_REMOTE_CANDIDATES,
        }
    }

    /// A finder that only uses the bundled catalog.
    pub fn offline(max_results: usize) -> Self {
        let catalog: Arc<dyn RecipeSource> = Arc::new(StaticCatalogSource);
        Self::new(vec![catalog], max_results)
    }

    /// The standard chain: the recipe API, then the catalog.
    pub fn with_remote<C: HttpClient + 'static>(
        client: Arc<SpoonacularClient<C>>,
        config: &LarderConfig,
    ) -> Self {
        let remote: Arc<dyn RecipeSource> = Arc::new(RemoteRecipeSource::new(client));
        Self::new(
            vec![remote, Arc::new(StaticCatalogSource)],
            config.max_results,
        )
        .candidate_limit(config.remote_candidates)
    }

    /// Set how many candidates are requested from each source.
    pub fn candidate_limit(mut self, limit: usize) -> Self {
        self.candidate_limit = limit;
        self
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Find and rank recipes for the selected ingredients.
    ///
    /// Never fails. Blank names are dropped; a selection with nothing left
    /// yields an empty outcome without consulting any source.
    pub async fn find_matching_recipes(&self, selected: &[String]) -> SearchOutcome {
        let selected: Vec<String> = selected
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        if selected.is_empty() {
            return SearchOutcome::default();
        }

        let mut advisory = None;
        let mut degraded = false;

        for source in &self.sources {
            let candidates = match source.candidates(&selected, self.candidate_limit).await {
                Ok(candidates) => candidates,
                Err(e) => {
                    if e.is_actionable() {
                        tracing::warn!(source = source.name(), error = %e, "source failed, falling back");
                        advisory = Some(match e {
                            SourceError::InvalidCredential => Advisory::InvalidCredential,
                            _ => Advisory::QuotaExceeded,
                        });
                    } else if source.is_remote() {
                        tracing::debug!(source = source.name(), error = %e, "source unavailable, falling back");
                    } else {
                        tracing::warn!(source = source.name(), error = %e, "local source failed");
                    }
                    degraded |= source.is_remote();
                    continue;
                }
            };

            let matches = matching::rank(&selected, &candidates, &source.policy(), self.max_results);
            if matches.is_empty() {
                tracing::debug!(
                    source = source.name(),
                    candidates = candidates.len(),
                    "no matches, trying next source"
                );
                continue;
            }

            tracing::debug!(source = source.name(), matches = matches.len(), "search complete");
            return SearchOutcome {
                matches,
                advisory,
                source: Some(source.name()),
                degraded,
            };
        }

        SearchOutcome {
            matches: Vec::new(),
            advisory: advisory.or(Some(Advisory::NoMatches)),
            source: None,
            degraded,
        }
    }
}
