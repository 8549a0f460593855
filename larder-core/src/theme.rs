//! Persisted light/dark preference.

use std::fmt;
use std::sync::Arc;

use crate::error::StorageError;
use crate::storage::{KeyValueStore, THEME_KEY};
use crate::types::Advisory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    /// Anything other than "dark" reads as light.
    pub fn parse(value: &str) -> Self {
        if value.trim() == "dark" {
            ThemePreference::Dark
        } else {
            ThemePreference::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct ThemeStore {
    store: Arc<dyn KeyValueStore>,
    current: ThemePreference,
    last_persist_error: Option<StorageError>,
}

impl ThemeStore {
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let current = match store.get(THEME_KEY) {
            Ok(Some(value)) => ThemePreference::parse(&value),
            Ok(None) => ThemePreference::default(),
            Err(e) => {
                tracing::warn!("Failed to load theme preference: {}", e);
                ThemePreference::default()
            }
        };
        Self {
            store,
            current,
            last_persist_error: None,
        }
    }

    pub fn current(&self) -> ThemePreference {
        self.current
    }

    pub fn is_dark(&self) -> bool {
        self.current == ThemePreference::Dark
    }

    /// Flip the preference and persist it.
    pub fn toggle(&mut self) -> ThemePreference {
        let next = self.current.toggled();
        match self.store.set(THEME_KEY, next.as_str()) {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                tracing::warn!("Failed to save theme preference: {}", e);
                self.last_persist_error = Some(e);
            }
        }
        self.current = next;
        next
    }

    pub fn last_persist_error(&self) -> Option<&StorageError> {
        self.last_persist_error.as_ref()
    }

    /// `PersistenceWriteFailure` if the last toggle was not saved.
    pub fn advisory(&self) -> Option<Advisory> {
        self.last_persist_error
            .as_ref()
            .map(|_| Advisory::PersistenceWriteFailure)
    }
}
