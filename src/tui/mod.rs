// File: ./src/tui/mod.rs
// Entry point and main loop for the TUI application.
pub mod action;
pub mod handlers;
pub mod runner;
pub mod state;
pub mod view;

use crate::config::Config;
use crate::lazy::LazyCli;
use crate::tui::action::Action;
use crate::tui::state::AppState;
use crate::tui::view::draw;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{io, time::Duration};
use tokio::sync::mpsc;

pub async fn run(config: Config) -> Result<()> {
    log::info!(
        "Starting TUI (command: {}, timeout: {}s)",
        config.lazy_command,
        config.command_timeout_secs
    );

    // --- 1. TERMINAL SETUP ---
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // --- 2. STATE INIT ---
    let mut app_state = AppState::from_config(&config);

    let (action_tx, action_rx) = mpsc::channel(10);
    let (event_tx, mut event_rx) = mpsc::channel(10);

    // --- 3. CLI ACTOR ---
    let actor = tokio::spawn(runner::run_cli_actor(
        LazyCli::from_config(&config),
        action_rx,
        event_tx,
    ));

    // --- 4. UI LOOP ---
    let loop_result: Result<()> = async {
        loop {
            terminal.draw(|f| draw(f, &mut app_state))?;

            // A. CLI Events
            while let Ok(event) = event_rx.try_recv() {
                if let Some(follow_up) = handlers::handle_app_event(&mut app_state, event) {
                    let _ = action_tx.send(follow_up).await;
                }
            }

            // B. Input Events
            if crossterm::event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Mouse(mouse) => match mouse.kind {
                        MouseEventKind::ScrollDown => app_state.next(),
                        MouseEventKind::ScrollUp => app_state.previous(),
                        _ => {}
                    },
                    Event::Key(key) => {
                        // Filter out KeyRelease events to prevent double input on Windows
                        if key.kind == event::KeyEventKind::Release {
                            continue;
                        }
                        if let Some(action) = handlers::handle_key_event(key, &mut app_state) {
                            if matches!(action, Action::Quit) {
                                let _ = action_tx.send(Action::Quit).await;
                                break;
                            }
                            let _ = action_tx.send(action).await;
                        }
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
    .await;

    // --- 5. CLEANUP ---
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // A long-running `lazy` call should not hold up exit.
    actor.abort();
    log::info!("TUI closed");

    if let Err(e) = &loop_result {
        log::error!("UI loop failed: {:#}", e);
    }
    loop_result
}
