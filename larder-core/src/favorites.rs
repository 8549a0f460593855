//! Favorite recipes, persisted as a JSON array under one storage key.
//!
//! Storage is a best-effort cache of session state. Each mutation writes the
//! full new list first and then updates memory whether or not the write
//! succeeded; failures are logged and kept for the caller to report.

use std::sync::Arc;

use crate::error::StorageError;
use crate::storage::{KeyValueStore, FAVORITES_KEY};
use crate::types::{Advisory, Recipe};

pub struct FavoritesStore {
    store: Arc<dyn KeyValueStore>,
    favorites: Vec<Recipe>,
    last_persist_error: Option<StorageError>,
}

impl FavoritesStore {
    /// Load saved favorites. Missing, unreadable or corrupt data starts empty.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let favorites = match store.get(FAVORITES_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<Recipe>>(&json) {
                Ok(mut favorites) => {
                    let mut seen = std::collections::HashSet::new();
                    favorites.retain(|r| seen.insert(r.title.clone()));
                    favorites
                }
                Err(e) => {
                    tracing::warn!("Failed to parse saved favorites: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to load favorites: {}", e);
                Vec::new()
            }
        };

        Self {
            store,
            favorites,
            last_persist_error: None,
        }
    }

    fn commit(&mut self, next: Vec<Recipe>) {
        let result = serde_json::to_string(&next)
            .map_err(StorageError::from)
            .and_then(|json| self.store.set(FAVORITES_KEY, &json));

        match result {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                tracing::warn!("Failed to save favorites: {}", e);
                self.last_persist_error = Some(e);
            }
        }
        self.favorites = next;
    }

    /// Add a recipe. Returns false if one with the same title is already saved.
    pub fn add(&mut self, recipe: Recipe) -> bool {
        if self.is_favorite(&recipe.title) {
            return false;
        }
        let mut next = self.favorites.clone();
        next.push(recipe);
        self.commit(next);
        true
    }

    /// Remove by title. Returns false if it was not a favorite.
    pub fn remove(&mut self, title: &str) -> bool {
        if !self.is_favorite(title) {
            return false;
        }
        let next = self
            .favorites
            .iter()
            .filter(|r| r.title != title)
            .cloned()
            .collect();
        self.commit(next);
        true
    }

    /// Add if absent, remove if present. Returns whether it is now a favorite.
    pub fn toggle(&mut self, recipe: Recipe) -> bool {
        if self.is_favorite(&recipe.title) {
            self.remove(&recipe.title);
            false
        } else {
            self.add(recipe);
            true
        }
    }

    pub fn is_favorite(&self, title: &str) -> bool {
        self.favorites.iter().any(|r| r.title == title)
    }

    pub fn clear_all(&mut self) {
        self.commit(Vec::new());
    }

    pub fn list(&self) -> &[Recipe] {
        &self.favorites
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    /// The error from the most recent write, if it failed.
    pub fn last_persist_error(&self) -> Option<&StorageError> {
        self.last_persist_error.as_ref()
    }

    pub fn advisory(&self) -> Option<Advisory> {
        self.last_persist_error
            .as_ref()
            .map(|_| Advisory::PersistenceWriteFailure)
    }
}
