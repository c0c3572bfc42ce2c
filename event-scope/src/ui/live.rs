use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use time::OffsetDateTime;
use tracing::debug;

use crate::{
    agg::reduce,
    model::{agg::Snapshot, cli::RunConfig, role::Role},
    ui::chart,
};

/// Redraw cadence.
pub const TICK: Duration = Duration::from_millis(2000);

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Restores the terminal when dropped, including during a panic unwind.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        // From here on, drop undoes whatever was switched on.
        let guard = Self;
        io::stdout().execute(EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(LeaveAlternateScreen);
    }
}

pub fn run_live_tui(config: &RunConfig) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut snapshot = tick(&mut terminal, config)?;
    let mut last_tick = Instant::now();

    loop {
        let timeout = TICK.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                    _ => {}
                },
                Event::Resize(..) => draw(&mut terminal, config, &snapshot)?,
                _ => {}
            }
        }

        if last_tick.elapsed() >= TICK {
            snapshot = tick(&mut terminal, config)?;
            last_tick = Instant::now();
        }
    }

    debug!("live view closed");
    Ok(())
}

/// Reduce, wipe the surface, draw from scratch.
fn tick(terminal: &mut Tui, config: &RunConfig) -> Result<Snapshot> {
    let snapshot = reduce(&config.logfile, config.ruleset);
    terminal.clear()?;
    draw(terminal, config, &snapshot)?;
    Ok(snapshot)
}

fn draw(terminal: &mut Tui, config: &RunConfig, snapshot: &Snapshot) -> Result<()> {
    let title = chart_title(config.role, snapshot.taken_at.to_offset(config.utc_offset));
    let categories = config.ruleset.categories();

    terminal.draw(|frame| {
        let area = frame.area();
        chart::render(frame, area, snapshot, categories, &title);
    })?;

    Ok(())
}

pub fn chart_title(role: Role, at: OffsetDateTime) -> String {
    format!(
        "Live Total Event Counts Summary for {} (Updated: {})",
        role,
        clock(at)
    )
}

/// `HH:MM:SS` in the timestamp's own offset.
pub fn clock(at: OffsetDateTime) -> String {
    format!("{:02}:{:02}:{:02}", at.hour(), at.minute(), at.second())
}
