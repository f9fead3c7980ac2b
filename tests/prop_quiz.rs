//! Property-based tests for distances and session bookkeeping.
//!
//! Run with: cargo test --release prop_quiz

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::collections::{BTreeSet, HashSet};

use proptest::prelude::*;

use geoquiz::{
    distance_km, CapitalCatalog, CitySelector, ClickOutcome, Difficulty, FilteredCatalog,
    GeoPoint, MemoryLedger, Phase, QuizConfig, ScoreLedger, SessionEngine, ATTEMPTS_PER_ROUND,
    EARTH_RADIUS_KM, ROUNDS_PER_SESSION,
};

fn point() -> impl Strategy<Value = GeoPoint> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(latitude, longitude)| GeoPoint {
        latitude,
        longitude,
    })
}

fn any_difficulty() -> impl Strategy<Value = Difficulty> {
    prop::sample::select(Difficulty::ALL.to_vec())
}

fn all_capitals() -> FilteredCatalog {
    let catalog = CapitalCatalog::builtin().unwrap();
    let continents: BTreeSet<String> = catalog.continents().into_iter().collect();
    catalog.filter_by_continents(&continents).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// A point is zero km from itself.
    #[test]
    fn prop_distance_to_self_is_zero(p in point()) {
        prop_assert!(distance_km(p, p).abs() < 1e-6);
    }

    /// Distance does not depend on argument order.
    #[test]
    fn prop_distance_symmetric(a in point(), b in point()) {
        prop_assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-6);
    }

    /// Distance is finite, non-negative and at most half the circumference.
    #[test]
    fn prop_distance_bounded(a in point(), b in point()) {
        let d = distance_km(a, b);
        prop_assert!(d.is_finite());
        prop_assert!(d >= 0.0);
        prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
    }

    /// The triangle inequality holds on the sphere.
    #[test]
    fn prop_triangle_inequality(a in point(), b in point(), c in point()) {
        prop_assert!(distance_km(a, c) <= distance_km(a, b) + distance_km(b, c) + 1e-3);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// No capital is asked twice in a session, whatever the seed.
    #[test]
    fn prop_session_never_repeats(seed in any::<u64>()) {
        let mut engine = SessionEngine::new(QuizConfig::default(), CitySelector::seeded(seed));
        let mut ledger = MemoryLedger::new();
        engine.start_session(all_capitals(), "p").unwrap();

        let mut seen = HashSet::new();
        for round in 1..=ROUNDS_PER_SESSION {
            prop_assert!(seen.insert(engine.round().unwrap().target_index()));
            let target = engine.target().unwrap().position();
            engine.evaluate_click(target, &mut ledger).unwrap();
            if round < ROUNDS_PER_SESSION {
                engine.advance_round().unwrap();
            }
        }
        prop_assert_eq!(engine.used_indices().unwrap().len(), 10);
    }

    /// Attempts only go down, the round ends exactly when it is decided, and
    /// only a hit scores.
    #[test]
    fn prop_round_bookkeeping(
        seed in any::<u64>(),
        difficulty in any_difficulty(),
        clicks in prop::collection::vec(point(), 1..6),
    ) {
        let mut engine = SessionEngine::new(QuizConfig { difficulty }, CitySelector::seeded(seed));
        let mut ledger = MemoryLedger::new();
        engine.start_session(all_capitals(), "p").unwrap();

        let mut attempts = ATTEMPTS_PER_ROUND;
        for click in clicks {
            if engine.phase() == Phase::RoundOver {
                prop_assert!(engine.evaluate_click(click, &mut ledger).is_err());
                continue;
            }

            let outcome = engine.evaluate_click(click, &mut ledger).unwrap();
            let round = *engine.round().unwrap();
            prop_assert!(round.attempts_remaining() <= attempts);
            attempts = round.attempts_remaining();

            prop_assert_eq!(outcome.ends_round(), round.is_over());
            prop_assert_eq!(engine.phase() == Phase::RoundOver, round.is_over());
            let hit = matches!(outcome, ClickOutcome::Hit { .. });
            prop_assert_eq!(hit, outcome.distance_km() <= difficulty.threshold_km());
            prop_assert_eq!(ledger.get_score("p"), u32::from(hit));
        }
    }
}
