// File: ./src/tui/state.rs
// Manages the application state for the TUI.
use crate::browser::FileBrowser;
use crate::config::Config;
use crate::model::AssignmentRecord;
use ratatui::widgets::ListState;
use std::path::PathBuf;

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum InputMode {
    Normal,
    /// Detail modal for the selected assignment.
    Viewing,
    /// File picker for a submission.
    Browsing,
}

pub struct AppState {
    // Data
    pub assignments: Vec<AssignmentRecord>,

    // UI State
    pub list_state: ListState,
    pub mode: InputMode,
    pub message: String,
    pub loading: bool,
    pub show_full_help: bool,
    pub urgent_hours: i64,

    // Detail modal
    pub detail_id: Option<String>,
    pub detail_content: String,
    pub detail_scroll: u16,

    // File picker
    pub browser: FileBrowser,
    pub browser_state: ListState,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(FileBrowser::new(PathBuf::from("."), false))
    }
}

impl AppState {
    pub fn new(browser: FileBrowser) -> Self {
        let mut l_state = ListState::default();
        l_state.select(Some(0));

        Self {
            assignments: vec![],
            list_state: l_state,
            mode: InputMode::Normal,
            message: "Loading...".to_string(),
            loading: true,
            show_full_help: false,
            urgent_hours: 24,

            detail_id: None,
            detail_content: String::new(),
            detail_scroll: 0,

            browser,
            browser_state: ListState::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let browser = FileBrowser::new(config.resolve_start_dir(), config.show_hidden_files);
        let mut state = Self::new(browser);
        state.urgent_hours = config.urgent_hours;
        state
    }

    /// Replaces the list and keeps the selection in range.
    pub fn set_assignments(&mut self, assignments: Vec<AssignmentRecord>) {
        self.assignments = assignments;
        let len = self.assignments.len();
        if len == 0 {
            self.list_state.select(None);
        } else {
            let current = self.list_state.selected().unwrap_or(0);
            self.list_state.select(Some(current.min(len - 1)));
        }
    }

    pub fn get_selected_assignment(&self) -> Option<&AssignmentRecord> {
        self.list_state
            .selected()
            .and_then(|idx| self.assignments.get(idx))
    }

    // --- NAVIGATION ---
    pub fn next(&mut self) {
        if self.assignments.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i >= self.assignments.len() - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.assignments.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) => self.assignments.len() - 1,
            Some(i) => i - 1,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn jump_forward(&mut self, step: usize) {
        if !self.assignments.is_empty() {
            let current = self.list_state.selected().unwrap_or(0);
            self.list_state
                .select(Some((current + step).min(self.assignments.len() - 1)));
        }
    }

    pub fn jump_backward(&mut self, step: usize) {
        if !self.assignments.is_empty() {
            let current = self.list_state.selected().unwrap_or(0);
            self.list_state.select(Some(current.saturating_sub(step)));
        }
    }

    // --- DETAIL MODAL ---
    pub fn open_detail(&mut self, assignment_id: &str) {
        self.detail_id = Some(assignment_id.to_string());
        self.detail_content = "Loading...".to_string();
        self.detail_scroll = 0;
        self.mode = InputMode::Viewing;
    }

    pub fn close_detail(&mut self) {
        self.detail_id = None;
        self.detail_content.clear();
        self.detail_scroll = 0;
        self.mode = InputMode::Normal;
    }

    pub fn scroll_detail_down(&mut self) {
        let last = self.detail_content.lines().count().saturating_sub(1);
        let max = u16::try_from(last).unwrap_or(u16::MAX);
        self.detail_scroll = self.detail_scroll.saturating_add(1).min(max);
    }

    pub fn scroll_detail_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    // --- FILE PICKER ---
    pub fn open_browser(&mut self) {
        if let Err(e) = self.browser.refresh() {
            self.message = format!("Error: {:#}", e);
        }
        self.browser_state.select(Some(0));
        self.mode = InputMode::Browsing;
    }

    pub fn close_browser(&mut self) {
        self.mode = InputMode::Normal;
    }

    pub fn next_file(&mut self) {
        let len = self.browser.entries().len();
        if len == 0 {
            return;
        }
        let i = match self.browser_state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.browser_state.select(Some(i));
    }

    pub fn previous_file(&mut self) {
        let len = self.browser.entries().len();
        if len == 0 {
            return;
        }
        let i = match self.browser_state.selected() {
            Some(0) => len - 1,
            Some(i) => i - 1,
            None => 0,
        };
        self.browser_state.select(Some(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> AssignmentRecord {
        AssignmentRecord {
            title: format!("Assignment {}", id),
            identifier: id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_navigation_next_wraps() {
        let mut state = AppState::default();
        state.set_assignments(vec![record("1"), record("2"), record("3")]);
        state.list_state.select(Some(0));

        state.next(); // 1
        assert_eq!(state.list_state.selected(), Some(1));

        state.next(); // 2
        assert_eq!(state.list_state.selected(), Some(2));

        state.next(); // Wrap to 0
        assert_eq!(state.list_state.selected(), Some(0));
    }

    #[test]
    fn test_navigation_previous_wraps() {
        let mut state = AppState::default();
        state.set_assignments(vec![record("1"), record("2"), record("3")]);
        state.list_state.select(Some(0));

        state.previous(); // Wrap to last (2)
        assert_eq!(state.list_state.selected(), Some(2));

        state.previous();
        assert_eq!(state.list_state.selected(), Some(1));
    }

    #[test]
    fn test_navigation_empty_list_safety() {
        let mut state = AppState::default();
        state.set_assignments(vec![]);

        state.next();
        state.previous();
        state.jump_forward(10);
        assert_eq!(state.get_selected_assignment(), None);
    }

    #[test]
    fn test_reload_clamps_selection() {
        let mut state = AppState::default();
        state.set_assignments(vec![record("1"), record("2"), record("3")]);
        state.list_state.select(Some(2));

        state.set_assignments(vec![record("9")]);
        assert_eq!(state.list_state.selected(), Some(0));
        assert_eq!(state.get_selected_assignment().unwrap().identifier, "9");
    }

    #[test]
    fn test_detail_scroll_bounds() {
        let mut state = AppState::default();
        state.open_detail("1");
        state.detail_content = "a\nb\nc".to_string();

        state.scroll_detail_up();
        assert_eq!(state.detail_scroll, 0);
        for _ in 0..10 {
            state.scroll_detail_down();
        }
        assert_eq!(state.detail_scroll, 2);

        state.close_detail();
        assert_eq!(state.mode, InputMode::Normal);
        assert_eq!(state.detail_scroll, 0);
    }

    #[test]
    fn test_detail_scroll_saturates_on_long_text() {
        let mut state = AppState::default();
        state.open_detail("1");
        state.detail_content = "x\n".repeat(70_000);
        state.detail_scroll = u16::MAX - 1;

        state.scroll_detail_down();
        state.scroll_detail_down();
        assert_eq!(state.detail_scroll, u16::MAX);
    }
}
