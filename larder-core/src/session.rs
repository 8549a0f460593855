//! Debounced recipe search driven by selection changes.
//!
//! Callers report each selection change; the session waits out the debounce
//! window, runs the search, and publishes the outcome on a watch channel only
//! if no newer change arrived in the meantime.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::debounce::Debouncer;
use crate::engine::{RecipeFinder, SearchOutcome};
use crate::types::{Advisory, RecipeMatch};

/// What the caller should currently display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// The selection these results belong to.
    pub selection: Vec<String>,
    pub matches: Vec<RecipeMatch>,
    pub advisory: Option<Advisory>,
    pub source: Option<&'static str>,
    pub degraded: bool,
    /// A search for `selection` is in flight.
    pub loading: bool,
}

impl SearchState {
    fn finished(selection: Vec<String>, outcome: SearchOutcome) -> Self {
        Self {
            selection,
            matches: outcome.matches,
            advisory: outcome.advisory,
            source: outcome.source,
            degraded: outcome.degraded,
            loading: false,
        }
    }
}

pub struct SearchSession {
    finder: Arc<RecipeFinder>,
    debouncer: Debouncer,
    state: Arc<watch::Sender<SearchState>>,
}

impl SearchSession {
    pub fn new(finder: Arc<RecipeFinder>, debounce: Duration) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            finder,
            debouncer: Debouncer::new(debounce),
            state: Arc::new(state),
        }
    }

    /// Watch the displayed state.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// The state as of now.
    pub fn current(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Report a new selection. Returns the handle of the background search,
    /// which completes without publishing if it was superseded.
    pub fn selection_changed(&self, selection: Vec<String>) -> JoinHandle<()> {
        let finder = Arc::clone(&self.finder);
        let debouncer = self.debouncer.clone();
        let state = Arc::clone(&self.state);
        let ticket = debouncer.trigger();

        tokio::spawn(async move {
            let Some(ticket) = debouncer.settle(ticket).await else {
                tracing::debug!(?selection, "selection superseded during debounce");
                return;
            };

            state.send_modify(|s| s.loading = true);
            let outcome = finder.find_matching_recipes(&selection).await;

            if !debouncer.is_current(ticket) {
                tracing::debug!(?selection, "discarding stale search result");
                return;
            }

            state.send_replace(SearchState::finished(selection, outcome));
        })
    }

    /// Drop pending searches and clear the results.
    pub fn reset(&self) {
        self.debouncer.cancel();
        self.state.send_replace(SearchState::default());
    }
}
