// File: src/session.rs
use crate::admin::DictionaryAdmin;
use crate::core::engine::ScoringEngine;
use crate::core::types::CategoryWords;
use crate::store::DictionaryStore;
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

/// Outcome of one protocol line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Ok(String),
    Err(String),
    Exit,
}

impl Reply {
    fn ok_json<T: serde::Serialize>(value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(json) => Reply::Ok(json),
            Err(e) => Reply::Err(format!("failed to encode reply: {e}")),
        }
    }
}

/// Line protocol over a scoring engine and its admin interface.
///
/// ```text
/// SCORE <text>        -> OK {"cognitive":0,...}
/// UPDATE <json>       -> OK {}
/// DICTIONARY          -> OK {"social":["friend"],...}
/// CATEGORIES          -> OK ["social",...]
/// EXIT
/// ```
pub struct Session<S> {
    engine: ScoringEngine<S>,
    admin: DictionaryAdmin<S>,
}

impl<S: DictionaryStore> Session<S> {
    pub fn new(engine: ScoringEngine<S>, admin: DictionaryAdmin<S>) -> Self {
        Self { engine, admin }
    }

    pub fn handle(&self, line: &str) -> Reply {
        let line = line.trim_end_matches(['\r', '\n']);
        let (command, rest) = match line.split_once(' ') {
            Some((c, r)) => (c, r),
            None => (line, ""),
        };
        debug!(command, "session command");

        match command {
            "SCORE" => match self.engine.score(rest) {
                Ok(scores) => Reply::ok_json(&scores),
                Err(e) => Reply::Err(e.to_string()),
            },
            "UPDATE" => {
                let categories: CategoryWords = match serde_json::from_str(rest) {
                    Ok(c) => c,
                    Err(e) => return Reply::Err(format!("invalid dictionary payload: {e}")),
                };
                match self.admin.update_dictionary(&categories) {
                    Ok(()) => Reply::Ok("{}".to_string()),
                    Err(e) => Reply::Err(e.to_string()),
                }
            }
            "DICTIONARY" => match self.admin.get_dictionary() {
                Ok(dictionary) => Reply::ok_json(&dictionary),
                Err(e) => Reply::Err(e.to_string()),
            },
            "CATEGORIES" => match self.admin.list_categories() {
                Ok(categories) => Reply::ok_json(&categories),
                Err(e) => Reply::Err(e.to_string()),
            },
            "EXIT" => Reply::Exit,
            "" => Reply::Err("empty command".to_string()),
            other => {
                warn!(command = other, "unknown session command");
                Reply::Err(format!("unknown command '{other}'"))
            }
        }
    }

    /// Serves lines from `input` until `EXIT` or end of input.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            match self.handle(&line?) {
                Reply::Ok(body) => writeln!(output, "OK {body}")?,
                Reply::Err(message) => writeln!(output, "ERR {message}")?,
                Reply::Exit => break,
            }
            output.flush()?;
        }
        Ok(())
    }
}
