//! Per-round state.

use serde::Serialize;

use crate::config::ATTEMPTS_PER_ROUND;
use crate::error::{QuizError, QuizResult};

/// How a concluded round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    /// The player clicked within the threshold.
    Won,
    /// All attempts were used up.
    Lost,
}

/// Result of a single click, for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// Within the threshold; the round is won.
    Hit {
        /// Click-to-target distance.
        distance_km: f64,
    },
    /// Outside the threshold; the player may try again.
    Miss {
        /// Click-to-target distance.
        distance_km: f64,
        /// Clicks left in this round (at least one).
        attempts_remaining: u8,
    },
    /// Outside the threshold on the last attempt; the round is lost.
    Lost {
        /// Click-to-target distance.
        distance_km: f64,
    },
}

impl ClickOutcome {
    /// Click-to-target distance.
    #[must_use]
    pub const fn distance_km(&self) -> f64 {
        match *self {
            Self::Hit { distance_km }
            | Self::Miss { distance_km, .. }
            | Self::Lost { distance_km } => distance_km,
        }
    }

    /// Whether this click decided the round.
    #[must_use]
    pub const fn ends_round(&self) -> bool {
        !matches!(self, Self::Miss { .. })
    }
}

/// Mutable state of the round in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundState {
    round_number: u32,
    target_index: usize,
    attempts_remaining: u8,
    won: bool,
    lost: bool,
}

impl RoundState {
    pub(crate) const fn new(round_number: u32, target_index: usize) -> Self {
        Self {
            round_number,
            target_index,
            attempts_remaining: ATTEMPTS_PER_ROUND,
            won: false,
            lost: false,
        }
    }

    /// 1-based round number.
    #[must_use]
    pub const fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Index of the target in the session's filtered catalog.
    #[must_use]
    pub const fn target_index(&self) -> usize {
        self.target_index
    }

    /// Clicks left.
    #[must_use]
    pub const fn attempts_remaining(&self) -> u8 {
        self.attempts_remaining
    }

    /// Whether the round was won.
    #[must_use]
    pub const fn won(&self) -> bool {
        self.won
    }

    /// Whether the round was lost.
    #[must_use]
    pub const fn lost(&self) -> bool {
        self.lost
    }

    /// Whether the round has been decided.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.won || self.lost
    }

    /// The outcome, once decided.
    #[must_use]
    pub const fn outcome(&self) -> Option<RoundOutcome> {
        if self.won {
            Some(RoundOutcome::Won)
        } else if self.lost {
            Some(RoundOutcome::Lost)
        } else {
            None
        }
    }

    /// Judge a click `distance_km` away from the target.
    ///
    /// A distance equal to the threshold is a hit.
    pub(crate) fn register_click(
        &mut self,
        distance_km: f64,
        threshold_km: f64,
    ) -> QuizResult<ClickOutcome> {
        if self.is_over() {
            return Err(QuizError::RoundAlreadyOver {
                round: self.round_number,
            });
        }

        if distance_km <= threshold_km {
            self.won = true;
            return Ok(ClickOutcome::Hit { distance_km });
        }

        self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
        if self.attempts_remaining == 0 {
            self.lost = true;
            Ok(ClickOutcome::Lost { distance_km })
        } else {
            Ok(ClickOutcome::Miss {
                distance_km,
                attempts_remaining: self.attempts_remaining,
            })
        }
    }
}
