// File: src/config.rs
use crate::core::types::UnknownCategoryPolicy;
use crate::error::{ConfigError, StorageError};
use crate::store::LexiconStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Engine settings, read from a JSON file such as
/// `{"dictionary_path": "data/lexicon.bin", "unknown_categories": "extend"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Snapshot file for the dictionary. `None` keeps it in memory only.
    pub dictionary_path: Option<PathBuf>,
    pub unknown_categories: UnknownCategoryPolicy,
}

impl EngineConfig {
    pub fn from_json(s: &str, origin: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|source| ConfigError::Parse { path: origin.to_path_buf(), source })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&content, path)
    }

    /// Applies a command-line dictionary path over the file config, falling back to `default`
    /// when neither names one.
    pub fn resolve(mut self, dictionary_override: Option<PathBuf>, default: &Path) -> Self {
        if let Some(path) = dictionary_override {
            self.dictionary_path = Some(path);
        }
        if self.dictionary_path.is_none() {
            self.dictionary_path = Some(default.to_path_buf());
        }
        self
    }

    /// Opens the store this config describes.
    pub fn open_store(&self) -> Result<LexiconStore, StorageError> {
        match &self.dictionary_path {
            Some(path) => LexiconStore::open(path),
            None => Ok(LexiconStore::in_memory()),
        }
    }
}
