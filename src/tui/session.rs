use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use agile_board::{
    app::{Action, AppState, SyncStatus},
    controller::{self, Flow},
    gate::Route,
    input,
    storage::config::Config,
    sync::{auth_session::AuthSession, sync_engine::SyncEngine},
};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::tui::presentation::ui;

const TICK_RATE: Duration = Duration::from_millis(250);

pub async fn run_tui(config: Config, auth: Arc<AuthSession>) -> Result<(), io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let engine = SyncEngine::new(config.clone(), Arc::clone(&auth));
    let mut app = AppState::from_config(&config);

    app.sync_status = SyncStatus::Syncing;
    terminal.draw(|f| ui(f, &app)).ok();
    controller::mount(&mut app, &engine, &auth).await;

    let res = run_app(&mut terminal, &mut app, &engine, &auth).await;

    app.gate.on_close(&auth).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    engine: &SyncEngine,
    auth: &AuthSession,
) -> io::Result<()> {
    let mut session_rx = auth.subscribe();
    session_rx.borrow_and_update();

    loop {
        if session_rx.has_changed().unwrap_or(false) {
            let session = session_rx.borrow_and_update().clone();
            let previous = app.route();
            app.on_session_change(session.as_ref());
            if previous != Route::Dashboard && app.route() == Route::Dashboard {
                controller::refresh_tab(app, engine, auth).await;
            }
        }

        app.tick(Instant::now());
        terminal.draw(|f| ui(f, app))?;

        if !event::poll(TICK_RATE)? {
            continue;
        }

        if let TermEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(action) = input::handle_key(key.code, app)
        {
            if is_remote(&action) {
                app.sync_status = SyncStatus::Syncing;
                terminal.draw(|f| ui(f, app))?;
            }
            if controller::apply(app, action, engine, auth).await == Flow::Quit {
                return Ok(());
            }
        }
    }
}

fn is_remote(action: &Action) -> bool {
    !matches!(action, Action::Quit | Action::CopyUserId)
}
