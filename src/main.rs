mod app;
mod ui;

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::AppState;
use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use inkbar::config::{self, AppConfig};
use inkbar::document::DocumentHost;
use inkbar::logging;
use inkbar::toolbar::{SelectionCause, Toolbar};
use ratatui::prelude::*;
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let cfg = config::load_config()?;
    logging::init(&cfg.logging)?;

    // Configuration errors surface before the terminal is taken over.
    let toolbar = build_toolbar(&cfg)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, cfg, toolbar).await;

    restore_terminal()?;

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

fn build_toolbar(cfg: &AppConfig) -> Result<Toolbar<DocumentHost>> {
    let host = DocumentHost::from_html(&cfg.editor.initial_html)
        .context("Failed to parse editor.initial_html")?;
    let descriptors = cfg.descriptors().context("Invalid toolbar configuration")?;
    let mut toolbar = Toolbar::new(host, cfg.toolbar_settings());
    toolbar
        .register_actions(descriptors)
        .context("Invalid toolbar configuration")?;
    toolbar.build().context("Failed to build toolbar")?;
    Ok(toolbar)
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: AppConfig,
    mut toolbar: Toolbar<DocumentHost>,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let mut state = AppState::new(cfg);
    let size = terminal.size()?;
    state.terminal_size = (size.width, size.height);

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if term_tx.send(AppEvent::Terminal(event)).is_err() {
                break;
            }
        }
    });

    // Spawn tick task (20 FPS = 50ms)
    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(50));
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    state.sync(&toolbar);
    terminal.draw(|f| ui::render(f, &state, &toolbar))?;

    while let Some(event) = event_rx.recv().await {
        if matches!(event, AppEvent::Tick) {
            let report = toolbar.tick(Instant::now());
            for finished in &report.completed {
                state.record_completion(finished);
            }
        }

        let actions = handler::handle_event(&mut state, event);
        for action in actions {
            apply_action(&mut toolbar, &mut state, action);
        }

        if state.should_quit {
            break;
        }

        state.sync(&toolbar);
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state, &toolbar))?;
            state.dirty = false;
        }
    }

    let host = toolbar.teardown();
    info!(html = %host.html(), "session ended");
    Ok(())
}

fn apply_action(toolbar: &mut Toolbar<DocumentHost>, state: &mut AppState, action: Action) {
    let moves = action.moves_selection();
    match action {
        Action::MoveFocus { delta, extend } => toolbar.host_mut().move_focus(delta, extend),
        Action::MoveFocusTo { offset, extend } => toolbar.host_mut().move_focus_to(offset, extend),
        Action::SelectAll => toolbar.host_mut().select_all(),
        Action::Blur => toolbar.host_mut().blur(),
        Action::Activate { name } => match toolbar.on_button_activated(&name) {
            Ok(activation) => state.record_activation(&activation),
            Err(e) => {
                warn!(action = %name, error = %e, "activation refused");
                state.set_status(format!("{name}: {e}"));
            }
        },
        Action::SubmitLink { url } => {
            if let Err(e) = toolbar.host_mut().submit_link(&url) {
                state.set_status(format!("link: {e}"));
            }
        }
        Action::CancelLink => {
            toolbar.host_mut().cancel_link();
        }
        Action::Quit => state.should_quit = true,
    }
    if moves {
        state.status_message = None;
        toolbar.selection_changed(Instant::now(), SelectionCause::KeyUp);
    }
}
