//! Interactive world map for the play command.

// Terminal cells and canvas coordinates are small; the casts are for display
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use super::output::{describe_click, format_report_text};
use super::CliError;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use geoquiz::{
    ClickOutcome, GeoPoint, Phase, QuizError, ScoreLedger, SessionEngine, SessionReport,
    ROUNDS_PER_SESSION,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as MapLine, Map, MapResolution, Points},
        Block, Borders, Clear, Paragraph, Wrap,
    },
    Frame, Terminal,
};
use std::io::stdout;
use std::time::{Duration, Instant};

/// Pause between a decided round and the next one.
const ROUND_PAUSE: Duration = Duration::from_secs(3);

/// Cursor step in degrees for arrow keys (Shift: fine step).
const CURSOR_STEP: f64 = 5.0;
const CURSOR_FINE_STEP: f64 = 1.0;

/// Points used to draw the threshold ring around a revealed target.
const RING_POINTS: u32 = 72;

/// A click placed on the map during the current round.
#[derive(Debug, Clone, Copy)]
struct PlacedClick {
    point: GeoPoint,
    hit: bool,
}

/// App state for the TUI.
#[derive(Debug)]
struct App {
    engine: SessionEngine,
    cursor: GeoPoint,
    clicks: Vec<PlacedClick>,
    message: String,
    show_all: bool,
    next_round_at: Option<Instant>,
    report: Option<SessionReport>,
    screen: Rect,
}

impl App {
    fn new(engine: SessionEngine) -> Self {
        let mut app = Self {
            engine,
            cursor: GeoPoint {
                latitude: 0.0,
                longitude: 0.0,
            },
            clicks: Vec::new(),
            message: String::new(),
            show_all: false,
            next_round_at: None,
            report: None,
            screen: Rect::default(),
        };
        app.announce_round();
        app
    }

    fn announce_round(&mut self) {
        if let Some(target) = self.engine.target() {
            self.message = format!("Find {} ({})", target.city, target.country);
        }
    }

    fn move_cursor(&mut self, d_lat: f64, d_lon: f64) {
        self.cursor = GeoPoint {
            latitude: (self.cursor.latitude + d_lat).clamp(-90.0, 90.0),
            longitude: (self.cursor.longitude + d_lon).clamp(-180.0, 180.0),
        };
    }

    /// Place a click, or skip the pause if the round is already decided.
    fn click<L: ScoreLedger + ?Sized>(
        &mut self,
        point: GeoPoint,
        ledger: &mut L,
    ) -> Result<(), CliError> {
        match self.engine.phase() {
            Phase::AwaitingClick => {}
            Phase::RoundOver => return self.next_round(),
            Phase::Idle | Phase::SessionComplete => return Ok(()),
        }

        let outcome = match self.engine.evaluate_click(point, ledger) {
            Ok(outcome) => outcome,
            Err(e @ QuizError::InvalidCoordinate { .. }) => {
                self.message = e.to_string();
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        self.clicks.push(PlacedClick {
            point,
            hit: matches!(outcome, ClickOutcome::Hit { .. }),
        });
        if let Some(target) = self.engine.target() {
            self.message = describe_click(&outcome, target);
        }
        if outcome.ends_round() {
            self.next_round_at = Some(Instant::now() + ROUND_PAUSE);
        }
        Ok(())
    }

    /// Move past a decided round: the next target, or the report after the last one.
    fn next_round(&mut self) -> Result<(), CliError> {
        if self.engine.phase() != Phase::RoundOver {
            return Ok(());
        }
        self.next_round_at = None;

        let last_round = self
            .engine
            .round()
            .is_some_and(|r| r.round_number() >= ROUNDS_PER_SESSION);
        if last_round {
            self.report = Some(self.engine.finish_session()?);
            self.message = "Session complete. Press n for a new game.".to_string();
            return Ok(());
        }

        match self.engine.advance_round() {
            Ok(_) => {
                self.clicks.clear();
                self.announce_round();
                Ok(())
            }
            Err(e @ QuizError::CatalogExhausted { .. }) => {
                self.message = format!("{e}. Press n for a new game.");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn new_game(&mut self) -> Result<(), CliError> {
        self.engine.restart()?;
        self.clicks.clear();
        self.next_round_at = None;
        self.report = None;
        self.announce_round();
        Ok(())
    }

    fn tick(&mut self) -> Result<(), CliError> {
        match self.next_round_at {
            Some(at) if Instant::now() >= at => self.next_round(),
            _ => Ok(()),
        }
    }

    fn countdown(&self) -> Option<u64> {
        self.next_round_at
            .map(|at| at.saturating_duration_since(Instant::now()).as_secs() + 1)
    }
}

/// Run the map UI until the player quits.
///
/// # Errors
///
/// Returns an error if the terminal fails or the engine rejects an operation.
pub(crate) fn run<L: ScoreLedger + ?Sized>(
    engine: SessionEngine,
    ledger: &mut L,
) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(engine);
    let result = event_loop(&mut terminal, &mut app, ledger);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B, L>(terminal: &mut Terminal<B>, app: &mut App, ledger: &mut L) -> Result<(), CliError>
where
    B: Backend,
    L: ScoreLedger + ?Sized,
{
    loop {
        let points = app.engine.player().map_or(0, |p| ledger.get_score(p));
        let frame = terminal.draw(|f| ui(f, &*app, points))?;
        app.screen = frame.area;

        app.tick()?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if !handle_key(app, key, ledger)? {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => handle_mouse(app, mouse, ledger)?,
            _ => {}
        }
    }
}

/// Returns `false` when the player quits.
fn handle_key<L: ScoreLedger + ?Sized>(
    app: &mut App,
    key: KeyEvent,
    ledger: &mut L,
) -> Result<bool, CliError> {
    let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
        CURSOR_FINE_STEP
    } else {
        CURSOR_STEP
    };

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(false),
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(step, 0.0),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(-step, 0.0),
        KeyCode::Left | KeyCode::Char('h') => app.move_cursor(0.0, -step),
        KeyCode::Right | KeyCode::Char('l') => app.move_cursor(0.0, step),
        KeyCode::Enter | KeyCode::Char(' ') => app.click(app.cursor, ledger)?,
        KeyCode::Char('c') => app.show_all = !app.show_all,
        KeyCode::Char('n') => app.new_game()?,
        _ => {}
    }
    Ok(true)
}

fn handle_mouse<L: ScoreLedger + ?Sized>(
    app: &mut App,
    mouse: MouseEvent,
    ledger: &mut L,
) -> Result<(), CliError> {
    let Some(point) = cell_to_geo(map_inner(app.screen), mouse.column, mouse.row) else {
        return Ok(());
    };
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.cursor = point;
            app.click(point, ledger)
        }
        MouseEventKind::Moved => {
            app.cursor = point;
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Split the screen into header, map, side panel and footer.
fn layout(area: Rect) -> [Rect; 4] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Map and rounds
            Constraint::Length(3), // Footer
        ])
        .split(area);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
        .split(chunks[1]);

    [chunks[0], main[0], main[1], chunks[2]]
}

fn map_block() -> Block<'static> {
    Block::default().borders(Borders::ALL).title(" World ")
}

/// The cells the canvas paints into.
fn map_inner(screen: Rect) -> Rect {
    map_block().inner(layout(screen)[1])
}

/// Convert a terminal cell inside `area` to the point at its center.
fn cell_to_geo(area: Rect, column: u16, row: u16) -> Option<GeoPoint> {
    if area.width == 0
        || area.height == 0
        || column < area.x
        || row < area.y
        || column >= area.x + area.width
        || row >= area.y + area.height
    {
        return None;
    }

    let fx = (f64::from(column - area.x) + 0.5) / f64::from(area.width);
    let fy = (f64::from(row - area.y) + 0.5) / f64::from(area.height);
    GeoPoint::new(90.0 - fy * 180.0, -180.0 + fx * 360.0).ok()
}

fn ui(f: &mut Frame, app: &App, points: u32) {
    let [header, map, rounds, footer] = layout(f.area());

    render_header(f, header, app, points);
    render_map(f, map, app);
    render_rounds(f, rounds, app);
    render_footer(f, footer, app);

    if let Some(report) = &app.report {
        render_report(f, report);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App, points: u32) {
    let player = app.engine.player().unwrap_or("-");
    let round = app.engine.round().map_or(0, |r| r.round_number());

    let title = format!(
        " GeoQuiz | {player} | Round {round}/{ROUNDS_PER_SESSION} | Threshold {} | Points: {points} ",
        app.engine.difficulty()
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_map(f: &mut Frame, area: Rect, app: &App) {
    let revealed = app.engine.phase() != Phase::AwaitingClick;
    let target = app.engine.target().map(geoquiz::CapitalEntry::position);
    let threshold = app.engine.difficulty().threshold_km();

    let canvas = Canvas::default()
        .block(map_block())
        .marker(Marker::Braille)
        .x_bounds([-180.0, 180.0])
        .y_bounds([-90.0, 90.0])
        .paint(|ctx| {
            ctx.draw(&Map {
                color: Color::Green,
                resolution: MapResolution::High,
            });
            ctx.layer();

            if app.show_all
                && let Some(catalog) = app.engine.catalog()
            {
                let all: Vec<(f64, f64)> = catalog
                    .entries()
                    .iter()
                    .map(|e| (e.longitude, e.latitude))
                    .collect();
                ctx.draw(&Points {
                    coords: &all,
                    color: Color::DarkGray,
                });
            }

            if revealed && let Some(target) = target {
                let ring: Vec<(f64, f64)> = (0..RING_POINTS)
                    .map(|i| {
                        let p = target.destination(f64::from(i) * 360.0 / f64::from(RING_POINTS), threshold);
                        (p.longitude, p.latitude)
                    })
                    .collect();
                ctx.draw(&Points {
                    coords: &ring,
                    color: Color::Yellow,
                });
                for click in &app.clicks {
                    ctx.draw(&MapLine {
                        x1: click.point.longitude,
                        y1: click.point.latitude,
                        x2: target.longitude,
                        y2: target.latitude,
                        color: Color::Gray,
                    });
                }
                ctx.print(
                    target.longitude,
                    target.latitude,
                    Span::styled("★", Style::default().fg(Color::Yellow)),
                );
            }

            for click in &app.clicks {
                let color = if click.hit { Color::LightGreen } else { Color::LightRed };
                ctx.print(
                    click.point.longitude,
                    click.point.latitude,
                    Span::styled("x", Style::default().fg(color)),
                );
            }

            ctx.print(
                app.cursor.longitude,
                app.cursor.latitude,
                Span::styled("+", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            );
        });

    f.render_widget(canvas, area);
}

fn render_rounds(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![Line::from("")];

    if let Some(catalog) = app.engine.catalog() {
        for (i, result) in app.engine.record().iter().enumerate() {
            let city = catalog.get(result.target_index).map_or("?", |e| e.city.as_str());
            let (mark, color) = if result.won {
                ("Correct", Color::Green)
            } else {
                ("Wrong", Color::Red)
            };
            lines.push(Line::from(vec![
                Span::raw(format!("{:>2} {city} ", i + 1)),
                Span::styled(mark, Style::default().fg(color)),
            ]));
        }
    }

    if app.report.is_none()
        && let (Some(round), Some(target)) = (app.engine.round(), app.engine.target())
    {
        let status = match round.outcome() {
            None => format!("{} left", round.attempts_remaining()),
            Some(_) if round.won() => "Correct".to_string(),
            Some(_) => "Wrong".to_string(),
        };
        lines.push(Line::from(Span::styled(
            format!("{:>2} {} {status}", round.round_number(), target.city),
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "Cursor {:.1}, {:.1}",
        app.cursor.latitude, app.cursor.longitude
    )));

    let rounds_widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Rounds "))
        .wrap(Wrap { trim: false });

    f.render_widget(rounds_widget, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controls = match app.countdown() {
        Some(secs) => format!(" {} | next round in {secs}s [Enter] Skip ", app.message),
        None => format!(
            " {} | [arrows] Move  [Enter] Click  [c] Capitals  [n] New game  [q] Quit ",
            app.message
        ),
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}

fn render_report(f: &mut Frame, report: &SessionReport) {
    let text = format_report_text(report);
    let height = (text.lines().count() as u16).saturating_add(2);
    let area = centered(f.area(), 76, height);

    let popup = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Results [n] New game [q] Quit "),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoquiz::{CapitalCatalog, CitySelector, MemoryLedger, QuizConfig};
    use std::collections::BTreeSet;

    fn app() -> App {
        let catalog = CapitalCatalog::builtin().unwrap();
        let europe = catalog
            .filter_by_continents(&BTreeSet::from(["Europe".to_string()]))
            .unwrap();
        let mut engine = SessionEngine::new(QuizConfig::default(), CitySelector::seeded(8));
        engine.start_session(europe, "tui").unwrap();
        App::new(engine)
    }

    #[test]
    fn test_cell_to_geo_corners() {
        let area = Rect::new(1, 1, 360, 180);

        let top_left = cell_to_geo(area, 1, 1).unwrap();
        assert!((top_left.latitude - 89.5).abs() < 1e-9);
        assert!((top_left.longitude + 179.5).abs() < 1e-9);

        let bottom_right = cell_to_geo(area, 360, 180).unwrap();
        assert!((bottom_right.latitude + 89.5).abs() < 1e-9);
        assert!((bottom_right.longitude - 179.5).abs() < 1e-9);

        assert!(cell_to_geo(area, 0, 5).is_none());
        assert!(cell_to_geo(area, 361, 5).is_none());
        assert!(cell_to_geo(Rect::default(), 0, 0).is_none());
    }

    #[test]
    fn test_cursor_stays_on_map() {
        let mut app = app();
        app.move_cursor(200.0, -400.0);
        assert!((app.cursor.latitude - 90.0).abs() < 1e-9);
        assert!((app.cursor.longitude + 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_hit_starts_countdown_and_enter_skips_it() {
        let mut app = app();
        let mut ledger = MemoryLedger::new();
        let target = app.engine.target().unwrap().position();

        app.click(target, &mut ledger).unwrap();
        assert_eq!(app.engine.phase(), Phase::RoundOver);
        assert!(app.countdown().is_some());
        assert!(app.message.starts_with("Correct!"));
        assert_eq!(ledger.get_score("tui"), 1);

        app.click(target, &mut ledger).unwrap();
        assert_eq!(app.engine.phase(), Phase::AwaitingClick);
        assert_eq!(app.engine.round().unwrap().round_number(), 2);
        assert!(app.clicks.is_empty());
        assert!(app.countdown().is_none());
    }

    #[test]
    fn test_full_session_shows_report() {
        let mut app = app();
        let mut ledger = MemoryLedger::new();
        for _ in 0..ROUNDS_PER_SESSION {
            let target = app.engine.target().unwrap().position();
            app.click(target, &mut ledger).unwrap();
            app.next_round().unwrap();
        }
        let report = app.report.as_ref().unwrap();
        assert_eq!(report.correct(), 10);

        app.new_game().unwrap();
        assert!(app.report.is_none());
        assert_eq!(app.engine.phase(), Phase::AwaitingClick);
    }
}
