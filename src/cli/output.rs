//! Output formatting utilities for CLI.

use geoquiz::{CapitalEntry, ClickOutcome, MemoryLedger, SessionReport};
use serde::Serialize;
use std::fmt::Write;

/// JSON-serializable capital listing.
#[derive(Debug, Serialize)]
pub(super) struct JsonCapitals<'a> {
    /// Continents included.
    pub(super) continents: Vec<&'a str>,
    /// Matching capitals in catalog order.
    pub(super) capitals: &'a [CapitalEntry],
}

/// Format a session report as the end-of-game table.
pub(super) fn format_report_text(report: &SessionReport) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "SESSION OVER - RESULTS FOR {}", report.player);
    let _ = writeln!(output, "Difficulty: {}", report.difficulty);
    output.push('\n');
    let _ = writeln!(
        output,
        "{:<8} {:<24} {:<27} {:<8}",
        "Round #", "Capital", "Country", "Result"
    );
    let _ = writeln!(output, "{}-{}-{}-{}", "-".repeat(8), "-".repeat(24), "-".repeat(27), "-".repeat(8));
    for entry in &report.rounds {
        let _ = writeln!(
            output,
            "Round {:>2} {:<24} {:<27} {}",
            entry.round,
            entry.city,
            entry.country,
            if entry.won { "Correct" } else { "Wrong" }
        );
    }
    output.push('\n');
    let _ = writeln!(output, "{} of {} correct", report.correct(), report.rounds.len());

    output
}

/// Format a filtered capital list.
pub(super) fn format_capitals_text(capitals: &[CapitalEntry]) -> String {
    let mut output = String::new();

    for entry in capitals {
        let _ = writeln!(
            output,
            "{:<26} {:<34} {:<14} {:>8.3} {:>9.3}",
            entry.city, entry.country, entry.continent, entry.latitude, entry.longitude
        );
    }
    let _ = writeln!(output, "\n{} capitals", capitals.len());

    output
}

/// Format the player list.
pub(super) fn format_players_text(ledger: &MemoryLedger) -> String {
    if ledger.is_empty() {
        return "No players yet.\n".to_string();
    }

    let mut output = String::new();
    for (name, points) in ledger.players() {
        let _ = writeln!(output, "{name}: {points} points");
    }
    output
}

/// One-line feedback for a click.
pub(super) fn describe_click(outcome: &ClickOutcome, target: &CapitalEntry) -> String {
    match *outcome {
        ClickOutcome::Hit { distance_km } => {
            format!("Correct! {} was {distance_km:.0} km away.", target.city)
        }
        ClickOutcome::Miss {
            distance_km,
            attempts_remaining,
        } => {
            let tries = if attempts_remaining == 1 { "attempt" } else { "attempts" };
            format!("Missed by {distance_km:.0} km. {attempts_remaining} {tries} left.")
        }
        ClickOutcome::Lost { distance_km } => format!(
            "Wrong. {} is at {:.2}, {:.2}; your last click was {distance_km:.0} km away.",
            target.city, target.latitude, target.longitude
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoquiz::{Difficulty, ReportEntry};

    fn berlin() -> CapitalEntry {
        CapitalEntry {
            city: "Berlin".to_string(),
            country: "Germany".to_string(),
            continent: "Europe".to_string(),
            latitude: 52.52,
            longitude: 13.405,
        }
    }

    #[test]
    fn test_report_table() {
        let report = SessionReport {
            player: "Hans".to_string(),
            difficulty: Difficulty::Medium,
            rounds: vec![
                ReportEntry {
                    round: 1,
                    target_index: 3,
                    city: "Berlin".to_string(),
                    country: "Germany".to_string(),
                    continent: "Europe".to_string(),
                    won: true,
                },
                ReportEntry {
                    round: 2,
                    target_index: 0,
                    city: "Oslo".to_string(),
                    country: "Norway".to_string(),
                    continent: "Europe".to_string(),
                    won: false,
                },
            ],
        };

        let text = format_report_text(&report);
        assert!(text.contains("RESULTS FOR Hans"));
        assert!(text.contains("500 km"));
        assert!(text.lines().any(|l| l.starts_with("Round  1 Berlin") && l.ends_with("Correct")));
        assert!(text.lines().any(|l| l.starts_with("Round  2 Oslo") && l.ends_with("Wrong")));
        assert!(text.contains("1 of 2 correct"));
    }

    #[test]
    fn test_describe_click() {
        let target = berlin();
        assert_eq!(
            describe_click(&ClickOutcome::Hit { distance_km: 42.4 }, &target),
            "Correct! Berlin was 42 km away."
        );
        assert_eq!(
            describe_click(
                &ClickOutcome::Miss {
                    distance_km: 900.0,
                    attempts_remaining: 1
                },
                &target
            ),
            "Missed by 900 km. 1 attempt left."
        );
        assert!(describe_click(&ClickOutcome::Lost { distance_km: 900.0 }, &target)
            .starts_with("Wrong. Berlin is at 52.52, "));
    }

    #[test]
    fn test_players_text() {
        let mut ledger = MemoryLedger::new();
        assert_eq!(format_players_text(&ledger), "No players yet.\n");
        ledger.register("anna");
        assert_eq!(format_players_text(&ledger), "anna: 0 points\n");
    }
}
