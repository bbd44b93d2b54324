// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The categories every score map reports, whatever the dictionary holds.
pub const FIXED_CATEGORIES: [&str; 4] = ["positive_emotion", "negative_emotion", "social", "cognitive"];

/// A single word → category assignment. `word` is the natural key of the dictionary.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub word: String,
    pub category: String,
}

impl LexiconEntry {
    pub fn new(word: impl Into<String>, category: impl Into<String>) -> Self {
        Self { word: word.into(), category: category.into() }
    }
}

/// Category name → word list. This is the admin payload shape (`{"social": ["friend", ...]}`)
/// and the shape of the grouped export. Iteration is in ascending category order.
pub type CategoryWords = BTreeMap<String, Vec<String>>;

/// Category → occurrence count for one analyzed text.
pub type ScoreMap = BTreeMap<String, u64>;

/// What scoring does with a dictionary hit whose category is not one of [`FIXED_CATEGORIES`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCategoryPolicy {
    /// Drop the hit; the score map keeps exactly the fixed keys.
    #[default]
    Ignore,
    /// Add the category to the score map as an extra key.
    Extend,
}

/// A score map with every fixed category present at zero.
pub fn empty_scores() -> ScoreMap {
    FIXED_CATEGORIES.iter().map(|c| (c.to_string(), 0)).collect()
}

pub fn is_fixed_category(category: &str) -> bool {
    FIXED_CATEGORIES.contains(&category)
}
