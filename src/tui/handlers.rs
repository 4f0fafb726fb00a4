// File: src/tui/handlers.rs
// Handles keyboard input and CLI events for the TUI.
use crate::browser::Step;
use crate::tui::action::{Action, AppEvent};
use crate::tui::state::{AppState, InputMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Applies an event from the CLI actor. May return a follow-up action.
pub fn handle_app_event(state: &mut AppState, event: AppEvent) -> Option<Action> {
    match event {
        AppEvent::Status(s) => state.message = s,
        AppEvent::Error(s) => {
            if state.mode == InputMode::Viewing {
                state.detail_content = format!("Error: {}", s);
            }
            state.message = format!("Error: {}", s);
            state.loading = false;
        }
        AppEvent::AssignmentsLoaded(records) => {
            state.set_assignments(records);
            state.loading = false;
        }
        AppEvent::DetailLoaded {
            assignment_id,
            content,
        } => {
            // Ignore late replies for a modal that was already closed or replaced.
            if state.mode == InputMode::Viewing
                && state.detail_id.as_deref() == Some(assignment_id.as_str())
            {
                state.detail_content = content;
                state.detail_scroll = 0;
            }
        }
        AppEvent::Submitted {
            assignment_id,
            resource_id,
            file_name,
        } => {
            state.message = format!(
                "Submitted {} (resource {}) to assignment {}.",
                file_name, resource_id, assignment_id
            );
            state.loading = true;
            return Some(Action::Refresh);
        }
    }
    None
}

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match state.mode {
        InputMode::Viewing => match key.code {
            KeyCode::Char('q') | KeyCode::Char('h') | KeyCode::Char('v') | KeyCode::Esc => {
                state.close_detail();
            }
            KeyCode::Down | KeyCode::Char('j') => state.scroll_detail_down(),
            KeyCode::Up | KeyCode::Char('k') => state.scroll_detail_up(),
            _ => {}
        },
        InputMode::Browsing => match key.code {
            KeyCode::Char('s') | KeyCode::Char('q') | KeyCode::Esc => state.close_browser(),
            KeyCode::Down | KeyCode::Char('j') => state.next_file(),
            KeyCode::Up | KeyCode::Char('k') => state.previous_file(),
            KeyCode::Char('h') | KeyCode::Backspace | KeyCode::Left => {
                match state.browser.go_up() {
                    Ok(()) => state.browser_state.select(Some(0)),
                    Err(e) => state.message = format!("Error: {:#}", e),
                }
            }
            KeyCode::Char('.') => {
                if let Err(e) = state.browser.toggle_hidden() {
                    state.message = format!("Error: {:#}", e);
                }
                state.browser_state.select(Some(0));
            }
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
                let idx = state.browser_state.selected().unwrap_or(0);
                match state.browser.open(idx) {
                    Ok(Step::Moved) => state.browser_state.select(Some(0)),
                    Ok(Step::Picked(path)) if key.code == KeyCode::Enter => {
                        state.close_browser();
                        let Some(assignment_id) = state
                            .get_selected_assignment()
                            .map(|a| a.identifier.clone())
                        else {
                            state.message = "No assignment selected.".to_string();
                            return None;
                        };
                        state.message =
                            format!("Submitting {} to {}...", path.display(), assignment_id);
                        return Some(Action::Submit {
                            assignment_id,
                            path,
                        });
                    }
                    // 'l' only navigates; picking a file needs Enter.
                    Ok(Step::Picked(_)) => {}
                    Err(e) => state.message = format!("Error: {:#}", e),
                }
            }
            _ => {}
        },
        InputMode::Normal => match key.code {
            KeyCode::Char('q') | KeyCode::Char('h') | KeyCode::Esc => return Some(Action::Quit),
            KeyCode::Down | KeyCode::Char('j') => state.next(),
            KeyCode::Up | KeyCode::Char('k') => state.previous(),
            KeyCode::PageDown => state.jump_forward(10),
            KeyCode::PageUp => state.jump_backward(10),
            KeyCode::Char('?') => state.show_full_help = !state.show_full_help,
            KeyCode::Char('r') => {
                state.loading = true;
                return Some(Action::Refresh);
            }
            KeyCode::Char('v') => {
                let Some(id) = state.get_selected_assignment().map(|a| a.identifier.clone())
                else {
                    state.message = "No assignment selected.".to_string();
                    return None;
                };
                state.open_detail(&id);
                return Some(Action::ViewAssignment(id));
            }
            KeyCode::Char('s') => {
                if state.get_selected_assignment().is_none() {
                    state.message = "No assignment selected.".to_string();
                    return None;
                }
                state.open_browser();
            }
            _ => {}
        },
    }
    None
}
