//! Play command implementation.

use super::output::{describe_click, format_report_text};
use super::{continent_set, load_catalog, tui, CliError, OutputFormat};
use geoquiz::{
    CitySelector, Difficulty, GeoPoint, Phase, QuizConfig, QuizError, ScoreFile, ScoreLedger,
    SessionEngine, SessionReport, ROUNDS_PER_SESSION,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Settings collected from the command line.
#[derive(Debug, Clone)]
pub(crate) struct PlayOptions {
    pub(crate) player: String,
    pub(crate) continents: Vec<String>,
    pub(crate) difficulty: Difficulty,
    pub(crate) catalog: Option<PathBuf>,
    pub(crate) scores: PathBuf,
    pub(crate) seed: Option<u64>,
    pub(crate) plain: bool,
    pub(crate) format: OutputFormat,
}

/// Execute the play command.
///
/// Scores are saved when the player quits, also after an error in the game
/// loop.
///
/// # Errors
///
/// Returns an error if the catalog or score file cannot be used, or the
/// terminal fails.
pub(crate) fn execute(options: PlayOptions) -> Result<(), CliError> {
    let player = options.player.trim().to_string();
    if player.is_empty() {
        return Err(CliError::new("the player name must not be empty"));
    }

    let catalog = load_catalog(options.catalog.as_deref())?;
    let selection = continent_set(&catalog, &options.continents)?;
    let filtered = catalog.filter_by_continents(&selection)?;
    if filtered.len() < ROUNDS_PER_SESSION as usize {
        log::warn!(
            "only {} capitals selected; the session ends early once they run out",
            filtered.len()
        );
    }

    let mut scores = ScoreFile::open(options.scores)?;
    scores.ledger_mut().register(&player);

    let selector = options.seed.map_or_else(CitySelector::from_entropy, CitySelector::seeded);
    let mut engine = SessionEngine::new(
        QuizConfig {
            difficulty: options.difficulty,
        },
        selector,
    );
    engine.start_session(filtered, player)?;

    let result = if options.plain {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        play_plain(&mut engine, &mut scores, options.format, &mut stdin.lock(), &mut stdout)
    } else {
        tui::run(engine, &mut scores)
    };

    scores.save()?;
    result
}

/// Line-oriented game loop.
///
/// Plays sessions until the player declines another one or input ends.
pub(crate) fn play_plain<L, R, W>(
    engine: &mut SessionEngine,
    ledger: &mut L,
    format: OutputFormat,
    input: &mut R,
    out: &mut W,
) -> Result<(), CliError>
where
    L: ScoreLedger + ?Sized,
    R: BufRead,
    W: Write,
{
    loop {
        let Some(report) = play_plain_session(engine, ledger, input, out)? else {
            return Ok(());
        };

        match format {
            OutputFormat::Text => write!(out, "\n{}", format_report_text(&report))?,
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&report)
                    .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
                writeln!(out, "{json}")?;
            }
        }
        writeln!(out, "Total points of {}: {}", report.player, ledger.get_score(&report.player))?;
        write!(out, "Play again? [y/N] ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 || !line.trim().eq_ignore_ascii_case("y") {
            return Ok(());
        }
        engine.restart()?;
    }
}

/// Play the session in progress. Returns `None` if the player quit.
fn play_plain_session<L, R, W>(
    engine: &mut SessionEngine,
    ledger: &mut L,
    input: &mut R,
    out: &mut W,
) -> Result<Option<SessionReport>, CliError>
where
    L: ScoreLedger + ?Sized,
    R: BufRead,
    W: Write,
{
    writeln!(out, "Enter clicks as \"latitude longitude\" (q to quit).")?;
    prompt_round(engine, out)?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text.eq_ignore_ascii_case("q") || text.eq_ignore_ascii_case("quit") {
            return Ok(None);
        }

        let click = match parse_click(text) {
            Ok(click) => click,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };

        let outcome = match engine.evaluate_click(click, ledger) {
            Ok(outcome) => outcome,
            Err(e @ QuizError::InvalidCoordinate { .. }) => {
                writeln!(out, "{e}")?;
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if let Some(target) = engine.target() {
            writeln!(out, "{}", describe_click(&outcome, target))?;
        }

        if engine.phase() != Phase::RoundOver {
            continue;
        }
        let last_round = engine
            .round()
            .is_some_and(|r| r.round_number() >= ROUNDS_PER_SESSION);
        if last_round {
            return Ok(Some(engine.finish_session()?));
        }
        match engine.advance_round() {
            Ok(_) => prompt_round(engine, out)?,
            Err(e @ QuizError::CatalogExhausted { .. }) => {
                writeln!(out, "{e}")?;
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn prompt_round<W: Write>(engine: &SessionEngine, out: &mut W) -> Result<(), CliError> {
    if let (Some(round), Some(target)) = (engine.round(), engine.target()) {
        writeln!(
            out,
            "\nRound {}/{ROUNDS_PER_SESSION}: find {} ({}, {})",
            round.round_number(),
            target.city,
            target.country,
            target.continent
        )?;
    }
    Ok(())
}

/// Parse `"lat lon"` or `"lat, lon"` into a point on the map.
pub(crate) fn parse_click(text: &str) -> Result<GeoPoint, String> {
    let mut parts = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty());
    let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected \"latitude longitude\", got {text:?}"));
    };

    let parse = |s: &str| {
        s.parse::<f64>()
            .map_err(|_| format!("not a number: {s:?}"))
    };
    GeoPoint::new(parse(lat)?, parse(lon)?).map_err(|e| e.to_string())
}
