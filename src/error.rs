//! Error types for the quiz engine and its file-backed collaborators.

use std::io;
use std::path::PathBuf;

use crate::quiz::Phase;

/// Errors raised by the quiz core.
///
/// Hits and misses are ordinary outcomes and never show up here. Every variant
/// is handed back to the caller unchanged; the core never retries or repairs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuizError {
    /// No capital matches the chosen continents.
    #[error("no capitals match the selected continents: {}", .continents.join(", "))]
    EmptySelection {
        /// The continents that were requested.
        continents: Vec<String>,
    },
    /// Every city of the filtered catalog has already been used this session.
    #[error("all {catalog_len} capitals of the selection have already been asked")]
    CatalogExhausted {
        /// Number of entries in the filtered catalog.
        catalog_len: usize,
    },
    /// A click arrived after the current round was decided.
    #[error("round {round} is already over")]
    RoundAlreadyOver {
        /// The concluded round.
        round: u32,
    },
    /// Click coordinates outside `[-90, 90] x [-180, 180]`.
    #[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate {
        /// Offending latitude in degrees.
        latitude: f64,
        /// Offending longitude in degrees.
        longitude: f64,
    },
    /// An operation was called in a phase that does not allow it.
    #[error("cannot {operation} while {phase}")]
    InvalidPhase {
        /// The rejected operation.
        operation: &'static str,
        /// The phase the engine was in.
        phase: Phase,
    },
    /// A threshold outside the supported difficulty levels.
    #[error("unsupported difficulty {0} km (expected 250, 500 or 1000)")]
    InvalidDifficulty(u32),
}

/// Errors raised while reading or writing the catalog and score files.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem failure.
    #[error("{}: {source}", .path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Malformed JSON.
    #[error("{}: {source}", .path.display())]
    Json {
        /// File being parsed.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },
    /// A catalog entry with coordinates off the map.
    #[error("catalog entry {index}: {source}")]
    InvalidEntry {
        /// Position of the entry in the source file.
        index: usize,
        /// The validation failure.
        source: QuizError,
    },
}

/// Result type for quiz operations.
pub type QuizResult<T> = Result<T, QuizError>;
