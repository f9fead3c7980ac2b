//! Session records and the end-of-session report.

use serde::Serialize;

use crate::catalog::FilteredCatalog;
use crate::config::Difficulty;

/// Outcome of one concluded round, as kept in the session record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundResult {
    /// Index of the target in the filtered catalog.
    pub target_index: usize,
    /// Whether the round was won.
    pub won: bool,
}

/// One row of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    /// 1-based round number.
    pub round: u32,
    /// Index of the target in the filtered catalog.
    pub target_index: usize,
    /// Target city.
    pub city: String,
    /// Target country.
    pub country: String,
    /// Target continent.
    pub continent: String,
    /// Whether the round was won.
    pub won: bool,
}

/// Summary handed out when a session finishes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    /// Who played.
    pub player: String,
    /// Threshold in effect.
    pub difficulty: Difficulty,
    /// One entry per round, in order.
    pub rounds: Vec<ReportEntry>,
}

impl SessionReport {
    pub(crate) fn build(
        player: &str,
        difficulty: Difficulty,
        record: &[RoundResult],
        catalog: &FilteredCatalog,
    ) -> Self {
        let rounds = (1u32..)
            .zip(record)
            .filter_map(|(round, result)| {
                let entry = catalog.get(result.target_index)?;
                Some(ReportEntry {
                    round,
                    target_index: result.target_index,
                    city: entry.city.clone(),
                    country: entry.country.clone(),
                    continent: entry.continent.clone(),
                    won: result.won,
                })
            })
            .collect();

        Self {
            player: player.to_string(),
            difficulty,
            rounds,
        }
    }

    /// Number of rounds won.
    #[must_use]
    pub fn correct(&self) -> usize {
        self.rounds.iter().filter(|r| r.won).count()
    }

    /// Number of rounds lost.
    #[must_use]
    pub fn wrong(&self) -> usize {
        self.rounds.len() - self.correct()
    }
}
