// src/core/lexicon.rs
use crate::core::types::{CategoryWords, LexiconEntry};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// An immutable dictionary value: word → category with a category → words index.
///
/// Stores never mutate a `Lexicon` in place. A replacement builds a fresh one and swaps it in,
/// which is what lets readers see either the old or the new dictionary and nothing in between.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    by_word: HashMap<String, String>,
    by_category: BTreeMap<String, BTreeSet<String>>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a lexicon from an admin payload.
    ///
    /// Words are lowercased. Categories are applied in ascending name order and words in list
    /// order, so when a word is listed under several categories the last one applied keeps it.
    pub fn from_categories(categories: &CategoryWords) -> Self {
        let mut lexicon = Self::new();
        for (category, words) in categories {
            for word in words {
                lexicon.insert(word.to_lowercase(), category.clone());
            }
        }
        lexicon
    }

    /// Rebuilds a lexicon from stored entries (already normalized).
    pub fn from_entries(entries: impl IntoIterator<Item = LexiconEntry>) -> Self {
        let mut lexicon = Self::new();
        for entry in entries {
            lexicon.insert(entry.word, entry.category);
        }
        lexicon
    }

    fn insert(&mut self, word: String, category: String) {
        if let Some(previous) = self.by_word.insert(word.clone(), category.clone()) {
            if let Some(words) = self.by_category.get_mut(&previous) {
                words.remove(&word);
                if words.is_empty() {
                    self.by_category.remove(&previous);
                }
            }
        }
        self.by_category.entry(category).or_default().insert(word);
    }

    pub fn len(&self) -> usize {
        self.by_word.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_word.is_empty()
    }

    pub fn category_of(&self, word: &str) -> Option<&str> {
        self.by_word.get(word).map(String::as_str)
    }

    /// Entries for every word of `words` present in the lexicon, in the iteration order of `words`.
    pub fn lookup_many<'a, I>(&self, words: I) -> Vec<LexiconEntry>
    where
        I: IntoIterator<Item = &'a String>,
    {
        words
            .into_iter()
            .filter_map(|w| self.by_word.get(w).map(|c| LexiconEntry::new(w.clone(), c.clone())))
            .collect()
    }

    pub fn categories(&self) -> BTreeSet<String> {
        self.by_category.keys().cloned().collect()
    }

    /// Every word grouped under its category, both levels ascending.
    pub fn grouped(&self) -> CategoryWords {
        self.by_category
            .iter()
            .map(|(category, words)| (category.clone(), words.iter().cloned().collect()))
            .collect()
    }

    /// All entries sorted by word; the persisted form of the lexicon.
    pub fn entries(&self) -> Vec<LexiconEntry> {
        let mut entries: Vec<LexiconEntry> = self
            .by_word
            .iter()
            .map(|(w, c)| LexiconEntry::new(w.clone(), c.clone()))
            .collect();
        entries.sort();
        entries
    }
}
