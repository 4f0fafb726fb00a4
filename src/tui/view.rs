// File: src/tui/view.rs
use crate::browser::EntryKind;
use crate::model::{AssignmentRecord, Urgency};
use crate::tui::state::{AppState, InputMode};

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

fn urgency_style(urgency: Urgency) -> Style {
    match urgency {
        Urgency::Overdue => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Urgency::Soon => Style::default().fg(Color::LightRed),
        Urgency::Normal => Style::default().fg(Color::Blue),
        Urgency::Unknown => Style::default().fg(Color::DarkGray),
    }
}

/// Cuts `text` to at most `width` terminal columns, ending in '…' when shortened.
/// CJK titles are two columns per character, so byte or char counts are not enough.
fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn assignment_item(a: &AssignmentRecord, urgency: Urgency, width: usize) -> ListItem<'static> {
    let id_tag = format!(" [{}]", a.identifier);
    let title = truncate_to_width(&a.title, width.saturating_sub(id_tag.width()));
    let first = Line::from(vec![
        Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(id_tag, Style::default().fg(Color::DarkGray)),
    ]);

    let mut second = vec![Span::raw("  ")];
    let course = a.course_label();
    if !course.is_empty() {
        second.push(Span::styled(course, Style::default().fg(Color::Cyan)));
        second.push(Span::raw("  "));
    }
    if let Some(deadline) = &a.deadline_text {
        second.push(Span::styled(deadline.clone(), urgency_style(urgency)));
    }
    if let Some(remaining) = &a.remaining_time_text {
        second.push(Span::styled(
            format!(" ({})", remaining),
            Style::default().fg(Color::Magenta),
        ));
    }

    ListItem::new(vec![first, Line::from(second)])
}

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let full_help_text = vec![
        Line::from(vec![
            Span::styled(
                " LIST ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" j/k:Up/Down  PgUp/PgDn:Scroll  v:View  s:Submit  r:Reload  q:Quit"),
        ]),
        Line::from(vec![
            Span::styled(
                " DETAILS ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" j/k:Scroll  q/h/v/Esc:Close"),
        ]),
        Line::from(vec![
            Span::styled(
                " FILES ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Enter:Open/Submit  l:Open dir  h:Parent  .:Hidden  q/s/Esc:Close"),
        ]),
    ];

    let footer_height = if state.show_full_help {
        Constraint::Length(full_help_text.len() as u16 + 2)
    } else {
        Constraint::Length(3)
    };

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4), footer_height])
        .split(f.area());

    let now = Local::now().naive_local();

    // --- Assignment List ---
    let inner_width = v_chunks[0].width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = state
        .assignments
        .iter()
        .map(|a| assignment_item(a, a.urgency(now, state.urgent_hours), inner_width))
        .collect();

    let title = if state.loading {
        " Pending Assignments (Loading...) ".to_string()
    } else {
        format!(" Pending Assignments ({}) ", state.assignments.len())
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::LightBlue)
                .fg(Color::Black),
        );
    f.render_stateful_widget(list, v_chunks[0], &mut state.list_state);

    // --- Preview ---
    let preview_lines = match state.get_selected_assignment() {
        Some(a) => {
            let deadline = a.deadline_text.clone().unwrap_or_else(|| "-".to_string());
            let mut deadline_spans = vec![
                Span::raw("Deadline: "),
                Span::styled(deadline, urgency_style(a.urgency(now, state.urgent_hours))),
            ];
            if let Some(remaining) = &a.remaining_time_text {
                deadline_spans.push(Span::raw(format!("  Remaining: {}", remaining)));
            }
            vec![
                Line::from(deadline_spans),
                Line::from(vec![
                    Span::raw("Link:     "),
                    Span::styled(
                        a.link.clone().unwrap_or_else(|| "-".to_string()),
                        Style::default().fg(Color::LightBlue),
                    ),
                ]),
            ]
        }
        None if state.loading => vec![Line::from("Loading...")],
        None => vec![Line::from("No pending assignments.")],
    };
    let preview = Paragraph::new(preview_lines)
        .block(Block::default().borders(Borders::ALL).title(" Details "));
    f.render_widget(preview, v_chunks[1]);

    // --- Footer ---
    let footer_area = v_chunks[2];
    f.render_widget(Clear, footer_area);
    if state.show_full_help {
        let p = Paragraph::new(full_help_text)
            .block(Block::default().borders(Borders::ALL).title(" Help "))
            .wrap(Wrap { trim: false });
        f.render_widget(p, footer_area);
    } else {
        let status = Paragraph::new(state.message.clone())
            .style(Style::default().fg(Color::Cyan))
            .block(
                Block::default()
                    .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                    .title(" Status "),
            );
        let help_str = match state.mode {
            InputMode::Normal => "?:Help q:Quit v:View s:Submit r:Reload",
            InputMode::Viewing => "j/k:Scroll q:Close",
            InputMode::Browsing => "↵:Select h:Up .:Hidden q:Close",
        };
        let help = Paragraph::new(help_str).alignment(Alignment::Right).block(
            Block::default()
                .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                .title(" Actions "),
        );

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(footer_area);
        f.render_widget(status, chunks[0]);
        f.render_widget(help, chunks[1]);
    }

    match state.mode {
        InputMode::Viewing => draw_detail_modal(f, state),
        InputMode::Browsing => draw_browser_modal(f, state),
        InputMode::Normal => {}
    }
}

fn draw_detail_modal(f: &mut Frame, state: &AppState) {
    let area = centered_rect(80, 70, f.area());
    let title = match &state.detail_id {
        Some(id) => format!(" Assignment {} ", id),
        None => " Assignment ".to_string(),
    };
    let p = Paragraph::new(state.detail_content.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(Line::from(" q/h/v: close ").alignment(Alignment::Center))
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .scroll((state.detail_scroll, 0));
    f.render_widget(Clear, area);
    f.render_widget(p, area);
}

fn draw_browser_modal(f: &mut Frame, state: &mut AppState) {
    let area = centered_rect(60, 60, f.area());
    let items: Vec<ListItem> = state
        .browser
        .entries()
        .iter()
        .map(|e| match e.kind {
            EntryKind::Parent => ListItem::new(Span::styled(
                format!("{}  [parent]", e.name),
                Style::default().fg(Color::DarkGray),
            )),
            EntryKind::Dir => ListItem::new(Span::styled(
                format!("{}/", e.name),
                Style::default().fg(Color::LightBlue),
            )),
            EntryKind::File => ListItem::new(e.name.clone()),
        })
        .collect();

    let title = format!(" Submit file: {} ", state.browser.cwd().display());
    let popup = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(
                    Line::from(" Enter: select/open | h: up | q, s: close ")
                        .alignment(Alignment::Center),
                ),
        )
        .highlight_style(Style::default().bg(Color::Blue));
    f.render_widget(Clear, area);
    f.render_stateful_widget(popup, area, &mut state.browser_state);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn test_truncate_counts_wide_chars() {
        // Each CJK char is two columns wide.
        let out = truncate_to_width("数据结构作业", 7);
        assert_eq!(out, "数据结…");
        assert!(out.width() <= 7);
    }
}
