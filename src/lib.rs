// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! GeoQuiz: find capital cities on a world map.
//!
//! A session is ten rounds. Each round picks a capital the player has not
//! seen yet in this session, and the player gets three clicks to land within
//! the difficulty threshold of it. Hits earn a point in the score ledger.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Presentation (TUI / plain CLI)    │
//! ├─────────────────────────────────────┤
//! │   SessionEngine  ◄──►  RoundState   │
//! ├──────────────┬──────────────────────┤
//! │ CitySelector │ GeoDistance │ Ledger │
//! ├──────────────┴──────────────────────┤
//! │          CapitalCatalog             │
//! └─────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod geo;
pub mod ledger;
pub mod quiz;
pub mod selector;

pub use catalog::{CapitalCatalog, CapitalEntry, FilteredCatalog};
pub use config::{Difficulty, QuizConfig, ATTEMPTS_PER_ROUND, ROUNDS_PER_SESSION};
pub use error::{QuizError, QuizResult, StoreError};
pub use geo::{distance_km, GeoPoint, EARTH_RADIUS_KM};
pub use ledger::{MemoryLedger, ScoreFile, ScoreLedger};
pub use quiz::{
    ClickOutcome, Phase, ReportEntry, RoundOutcome, RoundResult, RoundState, SessionEngine,
    SessionReport,
};
pub use selector::CitySelector;
