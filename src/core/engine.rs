// File: src/core/engine.rs
use crate::core::tokenizer::tokenize;
use crate::core::types::{empty_scores, is_fixed_category, ScoreMap, UnknownCategoryPolicy};
use crate::error::StorageError;
use crate::store::DictionaryStore;
use tracing::{debug, warn};

/// Counts category words in free text against an injected dictionary store.
///
/// Holds no dictionary state of its own: every call re-queries the store, so a replacement is
/// visible to the next `score`.
pub struct ScoringEngine<S> {
    store: S,
    unknown_categories: UnknownCategoryPolicy,
}

impl<S: DictionaryStore> ScoringEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store, unknown_categories: UnknownCategoryPolicy::default() }
    }

    pub fn with_unknown_categories(mut self, policy: UnknownCategoryPolicy) -> Self {
        self.unknown_categories = policy;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Scores `text`. The fixed categories are always present; each dictionary hit
    /// contributes its full repeat count.
    pub fn score(&self, text: &str) -> Result<ScoreMap, StorageError> {
        let mut scores = empty_scores();

        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Ok(scores);
        }

        let matches = self.store.lookup_many(&tokens.unique_words())?;
        for entry in &matches {
            let count = tokens.count_of(&entry.word);
            if is_fixed_category(&entry.category) {
                *scores.entry(entry.category.clone()).or_insert(0) += count;
                continue;
            }
            match self.unknown_categories {
                UnknownCategoryPolicy::Ignore => {
                    warn!(word = %entry.word, category = %entry.category, "ignoring hit outside the scored categories");
                }
                UnknownCategoryPolicy::Extend => {
                    *scores.entry(entry.category.clone()).or_insert(0) += count;
                }
            }
        }

        debug!(tokens = tokens.total(), unique = tokens.counts().len(), hits = matches.len(), "scored text");
        Ok(scores)
    }

    /// Scores a batch of texts in order, stopping at the first store failure.
    pub fn score_all<'a, I>(&self, texts: I) -> Result<Vec<ScoreMap>, StorageError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        texts.into_iter().map(|t| self.score(t)).collect()
    }
}
