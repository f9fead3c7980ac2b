//! Quiz settings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// Rounds played in one session.
pub const ROUNDS_PER_SESSION: u32 = 10;

/// Clicks a player gets per round.
pub const ATTEMPTS_PER_ROUND: u8 = 3;

/// Maximum click-to-target distance that still counts as a hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Difficulty {
    /// 1000 km.
    Easy,
    /// 500 km.
    #[default]
    Medium,
    /// 250 km.
    Hard,
}

impl Difficulty {
    /// All levels, most forgiving first.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// The threshold in whole kilometres.
    #[must_use]
    pub const fn km(self) -> u32 {
        match self {
            Self::Easy => 1000,
            Self::Medium => 500,
            Self::Hard => 250,
        }
    }

    /// The threshold as used in distance comparisons.
    #[must_use]
    pub fn threshold_km(self) -> f64 {
        f64::from(self.km())
    }
}

impl TryFrom<u32> for Difficulty {
    type Error = QuizError;

    fn try_from(km: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|d| d.km() == km)
            .ok_or(QuizError::InvalidDifficulty(km))
    }
}

impl From<Difficulty> for u32 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.km()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} km", self.km())
    }
}

/// Settings fixed for the duration of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Hit threshold.
    pub difficulty: Difficulty,
}
