//! Word-list configuration.
//!
//! The coordinator ships no word content of its own — the embedding
//! layer injects category → word-list data at construction time. The
//! room state machine only ever asks one question: "give me one uniform
//! random word from this category, or fail if it's unknown."

use std::collections::HashMap;

use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// Injected word lists, keyed by category name.
///
/// Serde-transparent over a plain map so the embedding layer can load
/// it straight from a JSON/TOML config value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordBank {
    lists: HashMap<String, Vec<String>>,
}

impl WordBank {
    /// Creates an empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion, mainly for tests and demos.
    pub fn with_category(
        mut self,
        name: impl Into<String>,
        words: &[&str],
    ) -> Self {
        self.lists
            .insert(name.into(), words.iter().map(|w| w.to_string()).collect());
        self
    }

    /// Returns `true` if `category` exists and has at least one word.
    pub fn contains(&self, category: &str) -> bool {
        self.lists.get(category).is_some_and(|w| !w.is_empty())
    }

    /// All category names, sorted for stable listings.
    pub fn categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> =
            self.lists.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Picks one uniformly-random word from `category`.
    ///
    /// Returns `None` for an unknown category or an empty list.
    pub fn pick(&self, category: &str) -> Option<&str> {
        self.lists
            .get(category)?
            .choose(&mut rand::rng())
            .map(String::as_str)
    }
}
