//! Player scores.
//!
//! The quiz engine only needs [`ScoreLedger`]; where the points live is up to
//! the caller. [`MemoryLedger`] keeps them in a map, [`ScoreFile`] backs that
//! map with a JSON object on disk (`{"name": points}`).

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Player name to points mapping consumed by the session engine.
pub trait ScoreLedger {
    /// Points of `player`, zero for players never seen.
    fn get_score(&self, player: &str) -> u32;

    /// Credit one point to `player`.
    fn add_point(&mut self, player: &str);
}

/// In-memory ledger with player management.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLedger {
    scores: BTreeMap<String, u32>,
}

impl MemoryLedger {
    /// Empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `player` has an entry.
    #[must_use]
    pub fn contains(&self, player: &str) -> bool {
        self.scores.contains_key(player)
    }

    /// Make sure `player` has an entry, returning their current points.
    pub fn register(&mut self, player: &str) -> u32 {
        *self.scores.entry(player.to_string()).or_insert(0)
    }

    /// Set `player`'s points back to zero. Returns `false` for unknown players.
    pub fn reset_points(&mut self, player: &str) -> bool {
        match self.scores.get_mut(player) {
            Some(points) => {
                *points = 0;
                true
            }
            None => false,
        }
    }

    /// Delete `player`. Returns their points if they existed.
    pub fn remove_player(&mut self, player: &str) -> Option<u32> {
        self.scores.remove(player)
    }

    /// All players with their points, ordered by name.
    pub fn players(&self) -> impl Iterator<Item = (&str, u32)> {
        self.scores.iter().map(|(name, points)| (name.as_str(), *points))
    }

    /// Number of known players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether no player is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl ScoreLedger for MemoryLedger {
    fn get_score(&self, player: &str) -> u32 {
        self.scores.get(player).copied().unwrap_or(0)
    }

    fn add_point(&mut self, player: &str) {
        let points = self.scores.entry(player.to_string()).or_insert(0);
        *points = points.saturating_add(1);
    }
}

/// A [`MemoryLedger`] loaded from and saved to a JSON file.
#[derive(Debug, Clone)]
pub struct ScoreFile {
    path: PathBuf,
    ledger: MemoryLedger,
}

impl ScoreFile {
    /// Load scores from `path`. A missing file yields an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let scores = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("no score file at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        Ok(Self {
            path,
            ledger: MemoryLedger { scores },
        })
    }

    /// Write the scores back to disk.
    ///
    /// Writes to a sibling temp file first and renames it over the target.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file I/O fails.
    pub fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.ledger.scores).map_err(|source| {
            StoreError::Json {
                path: self.path.clone(),
                source,
            }
        })?;

        let tmp = self.path.with_extension("json.tmp");
        let io_err = |source: io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;

        log::debug!("saved {} players to {}", self.ledger.len(), self.path.display());
        Ok(())
    }

    /// Location of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The scores held in memory.
    #[must_use]
    pub const fn ledger(&self) -> &MemoryLedger {
        &self.ledger
    }

    /// Mutable access for player management.
    pub fn ledger_mut(&mut self) -> &mut MemoryLedger {
        &mut self.ledger
    }
}

impl ScoreLedger for ScoreFile {
    fn get_score(&self, player: &str) -> u32 {
        self.ledger.get_score(player)
    }

    fn add_point(&mut self, player: &str) {
        self.ledger.add_point(player);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_player_has_zero() {
        let ledger = MemoryLedger::new();
        assert_eq!(ledger.get_score("nobody"), 0);
        assert!(!ledger.contains("nobody"));
    }

    #[test]
    fn test_add_point_registers_player() {
        let mut ledger = MemoryLedger::new();
        ledger.add_point("anna");
        ledger.add_point("anna");
        assert_eq!(ledger.get_score("anna"), 2);
        assert!(ledger.contains("anna"));
    }

    #[test]
    fn test_register_keeps_existing_points() {
        let mut ledger = MemoryLedger::new();
        ledger.add_point("ben");
        assert_eq!(ledger.register("ben"), 1);
        assert_eq!(ledger.register("cleo"), 0);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_reset_and_remove() {
        let mut ledger = MemoryLedger::new();
        ledger.add_point("dora");
        assert!(ledger.reset_points("dora"));
        assert_eq!(ledger.get_score("dora"), 0);
        assert!(ledger.contains("dora"));
        assert!(!ledger.reset_points("eve"));

        assert_eq!(ledger.remove_player("dora"), Some(0));
        assert_eq!(ledger.remove_player("dora"), None);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_players_sorted_by_name() {
        let mut ledger = MemoryLedger::new();
        ledger.add_point("zoe");
        ledger.register("adam");
        let players: Vec<(&str, u32)> = ledger.players().collect();
        assert_eq!(players, [("adam", 0), ("zoe", 1)]);
    }

    #[test]
    fn test_score_file_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = ScoreFile::open(dir.path().join("scores.json")).unwrap();
        assert!(file.ledger().is_empty());
    }

    #[test]
    fn test_score_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");

        let mut file = ScoreFile::open(&path).unwrap();
        file.add_point("finn");
        file.ledger_mut().register("gina");
        file.save().unwrap();

        let reopened = ScoreFile::open(&path).unwrap();
        assert_eq!(reopened.get_score("finn"), 1);
        assert!(reopened.ledger().contains("gina"));
        assert!(!dir.path().join("scores.json.tmp").exists());
    }

    #[test]
    fn test_score_file_reads_german_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spieler_score.json");
        fs::write(&path, r#"{"Hans": 12, "Grete": 3}"#).unwrap();

        let file = ScoreFile::open(&path).unwrap();
        assert_eq!(file.get_score("Hans"), 12);
        assert_eq!(file.get_score("Grete"), 3);
    }

    #[test]
    fn test_score_file_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(ScoreFile::open(&path), Err(StoreError::Json { .. })));
    }
}
