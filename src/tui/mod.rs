pub mod app;
pub mod theme;
pub mod ui;
pub mod widgets;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::engine::error::RunError;
use crate::engine::fetch::Fetch;
use crate::engine::runner::run_probes;
use crate::engine::types::{AggregateReport, ProbeEvent, RunConfig};

use app::App;

/// Run the full-screen dashboard until the user quits.
///
/// Returns the session outcome, or `None` when the user quit before the
/// last run finished.
pub async fn run<F>(
    fetcher: F,
    config: RunConfig,
) -> Result<Option<Result<AggregateReport, RunError>>>
where
    F: Fetch + 'static,
{
    // Setup terminal
    terminal::enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_inner(&mut terminal, fetcher, config).await;

    // Restore terminal
    terminal::disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_inner<F>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    fetcher: F,
    config: RunConfig,
) -> Result<Option<Result<AggregateReport, RunError>>>
where
    F: Fetch + 'static,
{
    let mut app = App::new(config.url().as_str(), config.repeat_count());

    let (tx, mut rx) = mpsc::channel::<ProbeEvent>(256);

    // Spawn engine
    let engine_handle = tokio::spawn(async move { run_probes(&fetcher, &config, tx).await });

    let tick_rate = Duration::from_millis(50);

    loop {
        // Draw
        terminal.draw(|f| ui::draw(f, &app))?;

        // Drain all pending engine events
        loop {
            match rx.try_recv() {
                Ok(event) => app.handle_event(event),
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => break,
            }
        }

        // Check for key events (non-blocking)
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            app.should_quit = true;
                        }
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Quitting mid-session abandons the remaining runs
    drop(rx);
    if !engine_handle.is_finished() {
        engine_handle.abort();
        return Ok(None);
    }
    Ok(Some(engine_handle.await?))
}
