// File: src/bin/main.rs
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use lexicon_core::persistence::read_categories_json;
use lexicon_core::session::Session;
use lexicon_core::{DictionaryAdmin, EngineConfig, ScoreMap, ScoringEngine, FIXED_CATEGORIES};
use std::error::Error;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DICTIONARY_PATH: &str = "lexicon.bin";

#[derive(Parser)]
#[command(name = "lexicon_engine", about = "Count category words in text against a lexicon", version)]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Dictionary snapshot file (overrides the config; default: lexicon.bin)
    #[arg(long, global = true)]
    dictionary: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score files, or stdin when none are given
    Score {
        files: Vec<PathBuf>,
        /// Print a table instead of JSON
        #[arg(long)]
        table: bool,
    },
    /// Replace the dictionary from a {"category": ["word", ...]} JSON file
    Update { file: PathBuf },
    /// Print the dictionary grouped by category
    Dictionary,
    /// Print the categories present in the dictionary
    Categories,
    /// Serve the line protocol on stdin/stdout
    Session,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("LEXICON_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    }
    .resolve(cli.dictionary, Path::new(DICTIONARY_PATH));

    let store = Arc::new(config.open_store()?);
    let engine = ScoringEngine::new(Arc::clone(&store)).with_unknown_categories(config.unknown_categories);
    let admin = DictionaryAdmin::new(Arc::clone(&store));

    let mut stdout = io::stdout().lock();
    match cli.command {
        Command::Score { files, table } => {
            if files.is_empty() {
                let mut input = String::new();
                io::stdin().read_to_string(&mut input)?;
                print_scores(&mut stdout, None, &engine.score(&input)?, table)?;
            } else {
                for path in &files {
                    let text = std::fs::read_to_string(path)
                        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
                    print_scores(&mut stdout, Some(path.display().to_string()), &engine.score(&text)?, table)?;
                }
            }
        }
        Command::Update { file } => {
            let categories = read_categories_json(&file)?;
            admin.update_dictionary(&categories)?;
            let words: usize = categories.values().map(Vec::len).sum();
            writeln!(stdout, "Dictionary updated: {} categories, {} words", categories.len(), words)?;
        }
        Command::Dictionary => {
            writeln!(stdout, "{}", serde_json::to_string_pretty(&admin.get_dictionary()?)?)?;
        }
        Command::Categories => {
            for category in admin.list_categories()? {
                writeln!(stdout, "{category}")?;
            }
        }
        Command::Session => {
            drop(stdout);
            Session::new(engine, admin).run(io::stdin().lock(), io::stdout().lock())?;
        }
    }
    Ok(())
}

fn print_scores(out: &mut impl Write, label: Option<String>, scores: &ScoreMap, table: bool) -> io::Result<()> {
    if !table {
        let json = serde_json::to_string_pretty(scores).map_err(io::Error::other)?;
        return writeln!(out, "{json}");
    }

    if let Some(label) = label {
        writeln!(out, "{}", label.bold())?;
    }
    // Fixed categories first in their canonical order, then any extras.
    let extras = scores.keys().filter(|k| !FIXED_CATEGORIES.contains(&k.as_str()));
    for category in FIXED_CATEGORIES.iter().copied().chain(extras.map(String::as_str)) {
        let count = scores.get(category).copied().unwrap_or(0);
        let value = if count > 0 { count.to_string().green().bold() } else { count.to_string().dark_grey() };
        writeln!(out, "  {:<20} {}", category, value)?;
    }
    Ok(())
}
