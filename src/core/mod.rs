// src/core/mod.rs
pub mod engine;
pub mod lexicon;
pub mod tokenizer;
pub mod types;
