//! CLI command implementations for GeoQuiz.

pub(crate) mod catalog;
pub(crate) mod play;
pub(crate) mod players;
pub(crate) mod tui;

mod output;

use clap::ValueEnum;
use geoquiz::{CapitalCatalog, Difficulty, QuizError, StoreError};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;
use std::path::Path;

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<QuizError> for CliError {
    fn from(e: QuizError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        Self::new(e.to_string())
    }
}

/// Parse a `--difficulty` value.
pub(crate) fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    let km: u32 = s
        .trim()
        .trim_end_matches("km")
        .trim()
        .parse()
        .map_err(|_| format!("expected 250, 500 or 1000, got {s:?}"))?;
    Difficulty::try_from(km).map_err(|e| e.to_string())
}

/// Load the catalog from `path`, or the built-in one.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<CapitalCatalog, CliError> {
    let catalog = match path {
        Some(path) => CapitalCatalog::load(path)?,
        None => CapitalCatalog::builtin()?,
    };
    if catalog.is_empty() {
        return Err(CliError::new("the capital catalog is empty"));
    }
    Ok(catalog)
}

/// Resolve a continent selection against the catalog's spelling.
///
/// Matching ignores case; unknown names are reported with the valid choices.
pub(crate) fn continent_set(
    catalog: &CapitalCatalog,
    requested: &[String],
) -> Result<BTreeSet<String>, CliError> {
    let known = catalog.continents();
    requested
        .iter()
        .map(|name| {
            known
                .iter()
                .find(|k| k.eq_ignore_ascii_case(name.trim()))
                .cloned()
                .ok_or_else(|| {
                    CliError::new(format!(
                        "unknown continent {name:?} (choose from: {})",
                        known.join(", ")
                    ))
                })
        })
        .collect()
}
