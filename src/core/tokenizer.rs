// src/core/tokenizer.rs
use std::collections::{BTreeSet, HashMap};

/// Repeat-aware result of tokenizing one text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenCounts {
    counts: HashMap<String, u64>,
    total: u64,
}

impl TokenCounts {
    /// Word → number of occurrences.
    pub fn counts(&self) -> &HashMap<String, u64> {
        &self.counts
    }

    pub fn count_of(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// The distinct words, ordered so that store queries are deterministic.
    pub fn unique_words(&self) -> BTreeSet<String> {
        self.counts.keys().cloned().collect()
    }

    /// Number of tokens including repeats.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    fn push(&mut self, word: &str) {
        *self.counts.entry(word.to_string()).or_insert(0) += 1;
        self.total += 1;
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_lowercase() || b == b'\''
}

/// Lowercases `text` and extracts maximal runs of `[a-z']`.
/// Everything else separates tokens. Single pass, O(n).
pub fn tokenize(text: &str) -> TokenCounts {
    let mut tokens = TokenCounts::default();
    if text.trim().is_empty() {
        return tokens;
    }

    let lowered = text.to_lowercase();
    let bytes = lowered.as_bytes();
    let mut start: Option<usize> = None;

    for (i, &b) in bytes.iter().enumerate() {
        match (is_word_byte(b), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                // Run boundaries are ASCII bytes, so the slice is valid UTF-8.
                tokens.push(&lowered[s..i]);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push(&lowered[s..]);
    }

    tokens
}
