//! Quiz session engine.
//!
//! A session is ten rounds. Each round has one target city and up to three
//! clicks:
//!
//! ```text
//!            miss, attempts left
//!              ┌──────────┐
//!              ▼          │
//! Idle ──► AwaitingClick ─┴─► RoundOver ──► AwaitingClick (next round)
//!  start        hit / last miss     │
//!                                   └──► SessionComplete (after round 10)
//! ```

mod report;
mod round;
mod session;

use std::fmt;

pub use report::{ReportEntry, RoundResult, SessionReport};
pub use round::{ClickOutcome, RoundOutcome, RoundState};
pub use session::SessionEngine;

/// Where the session state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No session has been started.
    Idle,
    /// The current round is waiting for a click.
    AwaitingClick,
    /// The current round has been decided.
    RoundOver,
    /// All rounds played and the report handed out.
    SessionComplete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "no session is running"),
            Self::AwaitingClick => write!(f, "awaiting a click"),
            Self::RoundOver => write!(f, "the round is over"),
            Self::SessionComplete => write!(f, "the session is complete"),
        }
    }
}
