//! The ten-round session state machine.

use std::collections::HashSet;

use crate::catalog::{CapitalEntry, FilteredCatalog};
use crate::config::{Difficulty, QuizConfig, ROUNDS_PER_SESSION};
use crate::error::{QuizError, QuizResult};
use crate::geo::{distance_km, GeoPoint};
use crate::ledger::ScoreLedger;
use crate::quiz::report::{RoundResult, SessionReport};
use crate::quiz::round::{ClickOutcome, RoundState};
use crate::quiz::Phase;
use crate::selector::CitySelector;

/// Everything that lives exactly as long as one session.
#[derive(Debug, Clone)]
struct Session {
    catalog: FilteredCatalog,
    player: String,
    round: RoundState,
    record: Vec<RoundResult>,
    used: HashSet<usize>,
}

/// Drives one player through a session.
///
/// The engine is plain data: the caller owns it, feeds it clicks, and renders
/// whatever the operations return. Nothing runs in the background.
#[derive(Debug, Clone)]
pub struct SessionEngine {
    config: QuizConfig,
    selector: CitySelector,
    phase: Phase,
    session: Option<Session>,
}

impl SessionEngine {
    /// Create an idle engine.
    #[must_use]
    pub const fn new(config: QuizConfig, selector: CitySelector) -> Self {
        Self {
            config,
            selector,
            phase: Phase::Idle,
            session: None,
        }
    }

    /// Start a new session, discarding any session in progress.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::CatalogExhausted`] if no first target can be
    /// chosen. The engine is unchanged on error.
    pub fn start_session(
        &mut self,
        catalog: FilteredCatalog,
        player: impl Into<String>,
    ) -> QuizResult<&RoundState> {
        let mut used = HashSet::new();
        let target = self.selector.next(&catalog, &used)?;
        used.insert(target);

        let player = player.into();
        log::info!(
            "starting session for {player} with {} capitals at {}",
            catalog.len(),
            self.config.difficulty
        );

        self.phase = Phase::AwaitingClick;
        let session = self.session.insert(Session {
            catalog,
            player,
            round: RoundState::new(1, target),
            record: Vec::with_capacity(ROUNDS_PER_SESSION as usize),
            used,
        });
        Ok(&session.round)
    }

    /// Start over with the current session's catalog and player.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::InvalidPhase`] if no session was ever started.
    pub fn restart(&mut self) -> QuizResult<&RoundState> {
        let Some(session) = &self.session else {
            return Err(Self::invalid("restart", self.phase));
        };
        let catalog = session.catalog.clone();
        let player = session.player.clone();
        self.start_session(catalog, player)
    }

    /// Judge a click for the current round.
    ///
    /// A hit credits one point to the player through `ledger`.
    ///
    /// # Errors
    ///
    /// - [`QuizError::RoundAlreadyOver`] if the round is already decided.
    /// - [`QuizError::InvalidPhase`] if no round is in play.
    /// - [`QuizError::InvalidCoordinate`] if the click is off the map.
    pub fn evaluate_click<L>(&mut self, click: GeoPoint, ledger: &mut L) -> QuizResult<ClickOutcome>
    where
        L: ScoreLedger + ?Sized,
    {
        let threshold_km = self.config.difficulty.threshold_km();
        let phase = self.phase;
        let session = match (phase, self.session.as_mut()) {
            (Phase::AwaitingClick, Some(session)) => session,
            (Phase::RoundOver, Some(session)) => {
                return Err(QuizError::RoundAlreadyOver {
                    round: session.round.round_number(),
                });
            }
            _ => return Err(Self::invalid("evaluate a click", phase)),
        };

        let click = GeoPoint::new(click.latitude, click.longitude)?;
        let target = session.catalog.entries()[session.round.target_index()].position();

        let outcome = session
            .round
            .register_click(distance_km(target, click), threshold_km)?;

        match outcome {
            ClickOutcome::Hit { distance_km } => {
                ledger.add_point(&session.player);
                log::debug!(
                    "round {}: hit at {distance_km:.1} km",
                    session.round.round_number()
                );
            }
            ClickOutcome::Miss {
                distance_km,
                attempts_remaining,
            } => log::debug!(
                "round {}: miss at {distance_km:.1} km, {attempts_remaining} left",
                session.round.round_number()
            ),
            ClickOutcome::Lost { distance_km } => log::debug!(
                "round {}: lost, last click {distance_km:.1} km away",
                session.round.round_number()
            ),
        }

        if outcome.ends_round() {
            self.phase = Phase::RoundOver;
        }
        Ok(outcome)
    }

    /// Record the decided round and move on to the next target.
    ///
    /// # Errors
    ///
    /// - [`QuizError::InvalidPhase`] unless the round is over and it was not
    ///   the last one.
    /// - [`QuizError::CatalogExhausted`] if every capital has been used. The
    ///   engine stays in the decided round in that case.
    pub fn advance_round(&mut self) -> QuizResult<&RoundState> {
        let phase = self.phase;
        let Some(session) = self.session.as_mut().filter(|_| phase == Phase::RoundOver) else {
            return Err(Self::invalid("advance the round", phase));
        };
        if session.round.round_number() >= ROUNDS_PER_SESSION {
            return Err(Self::invalid("advance past the final round", phase));
        }

        let target = self.selector.next(&session.catalog, &session.used)?;
        session.record.push(RoundResult {
            target_index: session.round.target_index(),
            won: session.round.won(),
        });
        session.used.insert(target);
        session.round = RoundState::new(session.round.round_number() + 1, target);
        log::debug!("round {} begins", session.round.round_number());

        self.phase = Phase::AwaitingClick;
        Ok(&session.round)
    }

    /// Record the final round and hand out the report.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::InvalidPhase`] unless the final round is over.
    pub fn finish_session(&mut self) -> QuizResult<SessionReport> {
        let phase = self.phase;
        let Some(session) = self.session.as_mut().filter(|_| phase == Phase::RoundOver) else {
            return Err(Self::invalid("finish the session", phase));
        };
        if session.round.round_number() < ROUNDS_PER_SESSION {
            return Err(Self::invalid("finish the session before the final round", phase));
        }

        session.record.push(RoundResult {
            target_index: session.round.target_index(),
            won: session.round.won(),
        });
        let report = SessionReport::build(
            &session.player,
            self.config.difficulty,
            &session.record,
            &session.catalog,
        );
        log::info!(
            "session for {} finished: {}/{} correct",
            report.player,
            report.correct(),
            report.rounds.len()
        );

        self.phase = Phase::SessionComplete;
        Ok(report)
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Settings the engine was created with.
    #[must_use]
    pub const fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Hit threshold in effect.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    /// The round in play, or the last one once the session is complete.
    #[must_use]
    pub fn round(&self) -> Option<&RoundState> {
        self.session.as_ref().map(|s| &s.round)
    }

    /// The current target city.
    #[must_use]
    pub fn target(&self) -> Option<&CapitalEntry> {
        let session = self.session.as_ref()?;
        session.catalog.get(session.round.target_index())
    }

    /// Rounds recorded so far.
    #[must_use]
    pub fn record(&self) -> &[RoundResult] {
        self.session.as_ref().map_or(&[], |s| s.record.as_slice())
    }

    /// Targets presented so far, including the current one.
    #[must_use]
    pub fn used_indices(&self) -> Option<&HashSet<usize>> {
        self.session.as_ref().map(|s| &s.used)
    }

    /// The session's filtered catalog.
    #[must_use]
    pub fn catalog(&self) -> Option<&FilteredCatalog> {
        self.session.as_ref().map(|s| &s.catalog)
    }

    /// The player of the current session.
    #[must_use]
    pub fn player(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.player.as_str())
    }

    const fn invalid(operation: &'static str, phase: Phase) -> QuizError {
        QuizError::InvalidPhase { operation, phase }
    }
}
