pub mod app;
pub mod event;
pub mod layout;
pub mod markdown;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{info, warn};

use crate::app::{AppContext, Result};
use crate::browser::Session;
use crate::domain::BookmarkSet;
use crate::jobs::JobRunner;

use self::app::{Effect, TuiApp};
use self::event::{AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Run the browser until the user quits. `start` is opened in the first
/// tab, falling back to the configured start page.
pub async fn run(ctx: Arc<AppContext>, start: Option<String>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx, start).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>, start: Option<String>) -> Result<()> {
    let config = &ctx.config;
    let bookmarks = if config.browser.enable_bookmarks {
        BookmarkSet::from_entries(ctx.bookmarks.load())
    } else {
        BookmarkSet::new()
    };
    info!("Loaded {} bookmarks", bookmarks.len());

    let mut session = Session::new(config.browser.clone(), bookmarks);
    let mut tui_app = TuiApp::new();
    let (runner, mut outcomes) = JobRunner::new(ctx.clone());
    let event_handler = EventHandler::new(Duration::from_millis(100));

    if let Some(start) = start.or_else(|| config.browser.start_page.clone()) {
        if let Some(effect) = tui_app.submit(&mut session, &start) {
            apply_effect(&ctx, &runner, &session, &mut tui_app, effect);
        }
    }

    loop {
        // Outcomes are applied one at a time, in arrival order.
        loop {
            match outcomes.try_recv() {
                Ok(outcome) => tui_app.handle_outcome(&mut session, outcome),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("Job channel closed");
                    break;
                }
            }
        }

        terminal.draw(|frame| layout::render(frame, &tui_app, &session, &config.colors))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                if let Some(effect) = tui_app.handle_key(&mut session, &config.keybindings, key) {
                    apply_effect(&ctx, &runner, &session, &mut tui_app, effect);
                }
            }
            AppEvent::Tick => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

fn apply_effect(
    ctx: &AppContext,
    runner: &JobRunner,
    session: &Session,
    tui_app: &mut TuiApp,
    effect: Effect,
) {
    match effect {
        Effect::Dispatch(job) => runner.dispatch(job),
        Effect::SaveBookmarks => {
            if let Err(e) = ctx.bookmarks.save(session.bookmarks().as_slice()) {
                warn!("Failed to save bookmarks: {}", e);
                tui_app.set_error(format!("Bookmark not saved: {}", e));
            }
        }
    }
}
