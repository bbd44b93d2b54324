// src/lib.rs

pub mod admin;
pub mod config;
pub mod core;
pub mod error;
pub mod persistence;
pub mod session;
pub mod store;

pub use crate::admin::DictionaryAdmin;
pub use crate::config::EngineConfig;
pub use crate::core::engine::ScoringEngine;
pub use crate::core::types::{CategoryWords, LexiconEntry, ScoreMap, UnknownCategoryPolicy, FIXED_CATEGORIES};
pub use crate::error::{ConfigError, StorageError};
pub use crate::store::{DictionaryStore, LexiconStore};
