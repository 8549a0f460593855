//! The bounded, ordered set of ingredients the user has picked.

use crate::types::Advisory;

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The selection is full; nothing changed.
    LimitReached,
    /// The name was blank; nothing changed.
    Ignored,
}

impl ToggleOutcome {
    /// The message to show for this outcome, if any.
    pub fn advisory(self, max: usize) -> Option<Advisory> {
        match self {
            ToggleOutcome::LimitReached => Some(Advisory::SelectionFull { max }),
            _ => None,
        }
    }
}

/// Selected ingredient names in insertion order, distinct ignoring case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedIngredients {
    items: Vec<String>,
    max: usize,
}

impl SelectedIngredients {
    pub fn new(max: usize) -> Self {
        Self {
            items: Vec::with_capacity(max),
            max,
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        let key = name.trim().to_lowercase();
        self.items.iter().position(|item| item.to_lowercase() == key)
    }

    /// Remove the ingredient if present, otherwise add it if there is room.
    pub fn toggle(&mut self, name: &str) -> ToggleOutcome {
        let name = name.trim();
        if name.is_empty() {
            return ToggleOutcome::Ignored;
        }

        if let Some(index) = self.position(name) {
            self.items.remove(index);
            return ToggleOutcome::Removed;
        }

        if self.is_full() {
            return ToggleOutcome::LimitReached;
        }

        self.items.push(name.to_string());
        ToggleOutcome::Added
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.max
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    /// An owned copy for handing to a search.
    pub fn snapshot(&self) -> Vec<String> {
        self.items.clone()
    }
}
